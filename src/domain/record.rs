// src/domain/record.rs

use crate::domain::bands::{AreaBand, PriceBand};
use crate::domain::logic::{parse_positive, round_to_u64};
use serde::{Deserialize, Deserializer, Serialize};

/// One harvested apartment complex with its sale listings folded in.
/// This is the row format handed from the harvester to the classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexRecord {
    pub complex_no: String,
    /// Portal region (cortarNo) the complex was listed under.
    #[serde(default)]
    pub region_code: Option<String>,
    /// Required for classification; rows without it are dropped there.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub units: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub low_floor: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub high_floor: Option<u32>,

    // Prices are in units of 10,000 KRW.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub price_min: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub price_max: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub price_median: Option<u64>,

    // Exclusive floor areas in square metres.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub area_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub area_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub area_rep: Option<f64>,

    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub listing_count: Option<u32>,

    #[serde(default)]
    pub road_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub extracted_at: Option<String>,
}

impl ComplexRecord {
    /// Trimmed display name, if it has one at all.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A single sale listing as fetched, kept for the listings sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRow {
    pub complex_no: String,
    pub complex_name: String,
    pub article_no: String,
    pub article_name: Option<String>,
    pub trade_type: Option<String>,
    pub price_text: Option<String>,
    pub price: Option<u64>,
    pub rent_price: Option<String>,
    pub area_supply: Option<f64>,
    pub area_exclusive: Option<f64>,
    pub floor: Option<String>,
    pub direction: Option<String>,
    pub confirmed_on: Option<String>,
    pub realtor: Option<String>,
    pub extracted_at: String,
}

/// A complex after classification. Read-only from the dashboard's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub complex_no: String,
    pub name: String,
    pub sub_area: String,
    pub year: Option<u32>,
    pub units: Option<u32>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub price_median: Option<u64>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub area_rep: Option<f64>,
    pub price_per_area: Option<u64>,
    pub price_band: Option<PriceBand>,
    pub area_band: Option<AreaBand>,
    pub listing_type: Option<String>,
    pub floor: Option<String>,
    pub orientation: Option<String>,
    pub listing_count: Option<u32>,
    pub road_address: Option<String>,
}

impl ClassifiedRecord {
    /// Price usable for statistics: present and positive.
    pub fn valid_price(&self) -> Option<u64> {
        self.price_median.filter(|p| *p > 0)
    }

    pub fn valid_price_per_area(&self) -> Option<u64> {
        self.price_per_area.filter(|p| *p > 0)
    }
}

// CSV cells arrive as text. Anything that is not a positive number is absent, never zero.

fn lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().and_then(parse_positive))
}

fn lenient_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(d)?.and_then(round_to_u64).filter(|v| *v > 0))
}

fn lenient_u32<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(d)?
        .filter(|v| *v <= u32::MAX as f64)
        .map(|v| v.round() as u32)
        .filter(|v| *v > 0))
}
