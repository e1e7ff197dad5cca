use crate::classifier::Summary;
use crate::domain::bands::{PriceBand, PriceBandRange};
use crate::domain::{ClassifiedRecord, SubAreaTable};
use crate::errors::ServerError;
use std::fs;
use std::path::Path;

/// The read-only record set behind the dashboard, plus the category lists its
/// filter controls are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub records: Vec<ClassifiedRecord>,
    /// Sub-area labels in display order.
    pub sub_areas: Vec<String>,
    pub price_bands: Vec<PriceBandRange>,
}

impl DashboardData {
    /// Category lists come from the summary when there is one, otherwise they
    /// are reconstructed from the records themselves.
    pub fn from_records(records: Vec<ClassifiedRecord>, summary: Option<Summary>) -> Self {
        let (sub_areas, price_bands) = match summary {
            Some(s) => (
                s.sub_areas.into_iter().map(|a| a.name).collect(),
                s.price_bands,
            ),
            None => (sub_areas_of(&records), price_bands_of(&records)),
        };
        Self {
            records,
            sub_areas,
            price_bands,
        }
    }

    pub fn band_label(&self, band: PriceBand) -> String {
        match self.price_bands.iter().find(|r| r.band == band) {
            Some(range) if range.count > 0 => format!("{band} ({})", range.range_label()),
            _ => band.to_string(),
        }
    }

    /// `classified.json` must hold a non-empty array. `summary.json` is optional.
    pub fn load(data: &Path, summary: &Path) -> Result<Self, ServerError> {
        let text = fs::read_to_string(data)
            .map_err(|e| ServerError::Load(format!("{}: {e}", data.display())))?;
        let records: Vec<ClassifiedRecord> = serde_json::from_str(&text)
            .map_err(|e| ServerError::Load(format!("{} is malformed: {e}", data.display())))?;
        if records.is_empty() {
            return Err(ServerError::Load(format!("{} holds no records", data.display())));
        }

        let summary = match fs::read_to_string(summary) {
            Ok(text) => match serde_json::from_str::<Summary>(&text) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable summary {}: {e}", summary.display());
                    None
                }
            },
            Err(_) => None,
        };

        tracing::info!("Loaded {} classified records from {}", records.len(), data.display());
        Ok(Self::from_records(records, summary))
    }
}

/// Known labels in lookup-table order, then any others alphabetically.
fn sub_areas_of(records: &[ClassifiedRecord]) -> Vec<String> {
    let present = |name: &String| records.iter().any(|r| &r.sub_area == name);
    let known = SubAreaTable::builtin().names();

    let mut names: Vec<String> = known.iter().filter(|n| present(n)).cloned().collect();
    let mut extra: Vec<String> = records
        .iter()
        .map(|r| r.sub_area.clone())
        .filter(|n| !known.contains(n))
        .collect();
    extra.sort();
    extra.dedup();
    names.extend(extra);
    names
}

fn price_bands_of(records: &[ClassifiedRecord]) -> Vec<PriceBandRange> {
    PriceBand::all()
        .map(|band| {
            let prices: Vec<u64> = records
                .iter()
                .filter(|r| r.price_band == Some(band))
                .filter_map(|r| r.valid_price())
                .collect();
            PriceBandRange {
                band,
                min_price: prices.iter().copied().min(),
                max_price: prices.iter().copied().max(),
                count: prices.len(),
            }
        })
        .collect()
}
