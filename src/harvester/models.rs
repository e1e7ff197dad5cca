use serde::{Deserialize, Deserializer};
use serde_json::Value;

// regions/list
//  └── regionList[]
//       ├── cortarNo
//       └── cortarName
//
// regions/complexes
//  ├── complexList[] (older payloads: complexes[])
//  └── isMoreData?
//
// articles/complex/{no}
//  ├── articleList[]
//  └── isMoreData

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionList {
    #[serde(default)]
    pub region_list: Vec<Region>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(deserialize_with = "string_or_number")]
    pub cortar_no: String,
    pub cortar_name: Option<String>,
}

impl Region {
    /// Root region stand-in when the portal lists no sub-regions.
    pub fn root(cortar_no: &str) -> Self {
        Self {
            cortar_no: cortar_no.to_string(),
            cortar_name: None,
        }
    }

    pub fn label(&self) -> &str {
        self.cortar_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.cortar_no)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPage {
    #[serde(default, alias = "complexes")]
    pub complex_list: Vec<ComplexSummary>,
    pub is_more_data: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub complex_no: String,
    pub complex_name: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_household_count: Option<f64>,
    pub use_approve_ymd: Option<String>,
}

/// The detail payload is sometimes nested under `complexDetail`;
/// see [`ComplexDetail::from_value`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexDetail {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub complex_no: Option<String>,
    pub complex_name: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_household_count: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub completion_year: Option<f64>,
    pub use_approve_ymd: Option<String>,
    pub road_address_prefix: Option<String>,
    pub road_address: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub low_floor: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub high_floor: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub longitude: Option<f64>,
}

impl ComplexDetail {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) if map.get("complexDetail").is_some_and(Value::is_object) => {
                let inner = map.remove("complexDetail").unwrap_or(Value::Null);
                serde_json::from_value(inner)
            }
            other => serde_json::from_value(other),
        }
    }

    /// Completion year, from `completionYear` or the first four digits of `useApproveYmd`.
    pub fn year(&self) -> Option<u32> {
        self.completion_year
            .filter(|y| *y > 0.0)
            .map(|y| y as u32)
            .or_else(|| year_from_ymd(self.use_approve_ymd.as_deref()))
    }

    /// Lowest and highest floor across the complex's buildings.
    pub fn floor_range(&self) -> (Option<u32>, Option<u32>) {
        let floor = |f: Option<f64>| f.filter(|v| *v > 0.0 && *v < 1_000.0).map(|v| v as u32);
        (floor(self.low_floor), floor(self.high_floor))
    }

    pub fn address(&self) -> Option<String> {
        self.road_address
            .clone()
            .or_else(|| self.road_address_prefix.clone())
            .filter(|s| !s.trim().is_empty())
    }
}

pub fn year_from_ymd(ymd: Option<&str>) -> Option<u32> {
    ymd.and_then(|s| s.get(0..4))
        .and_then(|y| y.parse::<u32>().ok())
        .filter(|y| *y > 0)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    #[serde(default)]
    pub article_list: Vec<Article>,
    #[serde(default)]
    pub is_more_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(deserialize_with = "string_or_number")]
    pub article_no: String,
    pub article_name: Option<String>,
    pub trade_type_name: Option<String>,
    pub deal_or_warrant_prc: Option<String>,
    pub rent_prc: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub area1: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub area2: Option<f64>,
    pub floor_info: Option<String>,
    pub direction: Option<String>,
    pub article_confirm_ymd: Option<String>,
    pub realtor_name: Option<String>,
}

impl Article {
    /// Exclusive area, falling back to supply area.
    pub fn area(&self) -> Option<f64> {
        self.area2
            .filter(|a| *a > 0.0)
            .or(self.area1.filter(|a| *a > 0.0))
    }
}

// The portal is loose about JSON types: ids come back as numbers or strings,
// and areas are sometimes quoted.

fn string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}
