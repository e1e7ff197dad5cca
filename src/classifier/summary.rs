use crate::domain::bands::{AreaBand, PriceBandRange};
use crate::domain::logic::{mean_u64, median_u64};
use crate::domain::ClassifiedRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAreaStats {
    pub name: String,
    pub count: usize,
    /// Records contributing to the price figures below.
    pub priced: usize,
    pub avg_price: Option<f64>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBandCount {
    pub band: AreaBand,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: u64,
    pub median: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_input: usize,
    pub dropped: usize,
    pub classified: usize,
    pub sub_areas: Vec<SubAreaStats>,
    pub price_bands: Vec<PriceBandRange>,
    pub area_bands: Vec<AreaBandCount>,
    pub unbanded_price: usize,
    pub unbanded_area: usize,
    pub price: Option<PriceStats>,
}

impl Summary {
    /// `names` fixes the row order of the sub-area table; every name gets a row.
    pub fn build(
        records: &[ClassifiedRecord],
        names: &[String],
        price_bands: Vec<PriceBandRange>,
        total_input: usize,
        dropped: usize,
    ) -> Summary {
        let sub_areas = names
            .iter()
            .map(|name| {
                let members: Vec<&ClassifiedRecord> =
                    records.iter().filter(|r| &r.sub_area == name).collect();
                let prices: Vec<u64> = members.iter().filter_map(|r| r.valid_price()).collect();
                SubAreaStats {
                    name: name.clone(),
                    count: members.len(),
                    priced: prices.len(),
                    avg_price: mean_u64(&prices),
                    min_price: prices.iter().copied().min(),
                    max_price: prices.iter().copied().max(),
                    share_pct: if records.is_empty() {
                        0.0
                    } else {
                        members.len() as f64 * 100.0 / records.len() as f64
                    },
                }
            })
            .collect();

        let area_bands = AreaBand::ALL
            .iter()
            .map(|band| AreaBandCount {
                band: *band,
                label: band.label().to_string(),
                count: records.iter().filter(|r| r.area_band == Some(*band)).count(),
            })
            .collect();

        let all_prices: Vec<u64> = records.iter().filter_map(|r| r.valid_price()).collect();
        let price = match (
            all_prices.iter().copied().min(),
            median_u64(&all_prices),
            all_prices.iter().copied().max(),
        ) {
            (Some(min), Some(median), Some(max)) => Some(PriceStats { min, median, max }),
            _ => None,
        };

        Summary {
            total_input,
            dropped,
            classified: records.len(),
            sub_areas,
            price_bands,
            area_bands,
            unbanded_price: records.iter().filter(|r| r.price_band.is_none()).count(),
            unbanded_area: records.iter().filter(|r| r.area_band.is_none()).count(),
            price,
        }
    }

    /// Sub-areas with prices, most expensive first.
    pub fn ranked_sub_areas(&self) -> Vec<&SubAreaStats> {
        let mut ranked: Vec<&SubAreaStats> =
            self.sub_areas.iter().filter(|s| s.avg_price.is_some()).collect();
        ranked.sort_by(|a, b| {
            b.avg_price
                .unwrap_or_default()
                .total_cmp(&a.avg_price.unwrap_or_default())
        });
        ranked
    }
}
