// src/domain/bands.rs

use crate::domain::logic::format_price;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRICE_BAND_COUNT: u8 = 10;

/// Equal-population price band, 1 (cheapest) through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBand(pub u8);

impl PriceBand {
    pub fn all() -> impl Iterator<Item = PriceBand> {
        (1..=PRICE_BAND_COUNT).map(PriceBand)
    }

    pub fn parse(raw: &str) -> Option<PriceBand> {
        raw.trim()
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=PRICE_BAND_COUNT).contains(n))
            .map(PriceBand)
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Band {}", self.0)
    }
}

/// One row of the price band table produced for a classification run.
/// Bounds are inclusive; an empty band has no bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBandRange {
    pub band: PriceBand,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub count: usize,
}

impl PriceBandRange {
    pub fn range_label(&self) -> String {
        match (self.min_price, self.max_price) {
            (Some(lo), Some(hi)) if lo == hi => format_price(lo),
            (Some(lo), Some(hi)) => format!("{} ~ {}", format_price(lo), format_price(hi)),
            _ => "empty".to_string(),
        }
    }
}

/// Result of banding: one optional band per input, in input order, plus the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBanding {
    pub assignments: Vec<Option<PriceBand>>,
    pub table: Vec<PriceBandRange>,
}

/// Splits priced entries into ten contiguous, equal-population groups.
///
/// Entries are ordered by price, then by `key`, then by input position, so
/// records sharing a boundary price always land in the same band across runs.
/// When the count does not divide by ten the extra entries go to the top bands.
pub fn compute_price_bands(entries: &[(&str, Option<u64>)]) -> PriceBanding {
    let mut priced: Vec<(usize, &str, u64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, (key, price))| price.filter(|p| *p > 0).map(|p| (i, *key, p)))
        .collect();

    priced.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.1.cmp(b.1)).then(a.0.cmp(&b.0)));

    let bands = PRICE_BAND_COUNT as usize;
    let base = priced.len() / bands;
    let extra = priced.len() % bands;

    let mut assignments = vec![None; entries.len()];
    let mut table = Vec::with_capacity(bands);
    let mut start = 0;

    for idx in 0..bands {
        let size = base + usize::from(idx >= bands - extra);
        let group = &priced[start..start + size];
        let band = PriceBand(idx as u8 + 1);

        for (pos, _, _) in group {
            assignments[*pos] = Some(band);
        }

        table.push(PriceBandRange {
            band,
            min_price: group.first().map(|g| g.2),
            max_price: group.last().map(|g| g.2),
            count: group.len(),
        });
        start += size;
    }

    PriceBanding { assignments, table }
}

/// Upper bounds (inclusive, square metres) for the first three area bands.
pub const SMALL_MAX_AREA: f64 = 85.0;
pub const SMALL_MEDIUM_MAX_AREA: f64 = 115.0;
pub const MEDIUM_MAX_AREA: f64 = 175.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaBand {
    Small,
    SmallMedium,
    Medium,
    Large,
}

impl AreaBand {
    pub const ALL: [AreaBand; 4] = [
        AreaBand::Small,
        AreaBand::SmallMedium,
        AreaBand::Medium,
        AreaBand::Large,
    ];

    /// `None` when the area is missing or not positive.
    pub fn for_area(area: Option<f64>) -> Option<AreaBand> {
        let area = area.filter(|a| a.is_finite() && *a > 0.0)?;
        Some(if area <= SMALL_MAX_AREA {
            AreaBand::Small
        } else if area <= SMALL_MEDIUM_MAX_AREA {
            AreaBand::SmallMedium
        } else if area <= MEDIUM_MAX_AREA {
            AreaBand::Medium
        } else {
            AreaBand::Large
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaBand::Small => "small",
            AreaBand::SmallMedium => "small_medium",
            AreaBand::Medium => "medium",
            AreaBand::Large => "large",
        }
    }

    pub fn parse(raw: &str) -> Option<AreaBand> {
        AreaBand::ALL.into_iter().find(|b| b.as_str() == raw.trim())
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaBand::Small => "Small (≤85㎡)",
            AreaBand::SmallMedium => "Small-medium (85-115㎡)",
            AreaBand::Medium => "Medium (115-175㎡)",
            AreaBand::Large => "Large (>175㎡)",
        }
    }

    /// (min exclusive, max inclusive) in square metres, for the exported schema.
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            AreaBand::Small => (0.0, Some(SMALL_MAX_AREA)),
            AreaBand::SmallMedium => (SMALL_MAX_AREA, Some(SMALL_MEDIUM_MAX_AREA)),
            AreaBand::Medium => (SMALL_MEDIUM_MAX_AREA, Some(MEDIUM_MAX_AREA)),
            AreaBand::Large => (MEDIUM_MAX_AREA, None),
        }
    }
}

impl fmt::Display for AreaBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
