// config.rs
use crate::domain::rules::SubAreaRule;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub harvest: HarvestConfig,
    pub classify: ClassifyConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    Fixed,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub base_url: String,
    pub region_code: String,
    pub real_estate_type: String,
    pub trade_type: String,
    pub delay_ms: u64,
    pub max_retries: u32,
    pub backoff: Backoff,
    pub jitter_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
    pub bbox: Option<BoundingBox>,
    pub output_dir: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://new.land.naver.com/api/".into(),
            region_code: "3611000000".into(),
            real_estate_type: "APT:ABYG:JGC".into(),
            trade_type: "A1".into(),
            delay_ms: 500,
            max_retries: 3,
            backoff: Backoff::Fixed,
            jitter_ms: 0,
            timeout_secs: 10,
            user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36"
                    .into(),
            referer: "https://new.land.naver.com/".into(),
            bbox: None,
            output_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Replaces the built-in lookup table when present. Order is priority.
    pub sub_areas: Option<Vec<SubAreaRule>>,
    pub other_label: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/complexes_latest.csv"),
            output_dir: PathBuf::from("data"),
            sub_areas: None,
            other_label: crate::domain::rules::OTHER_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub addr: String,
    pub data: PathBuf,
    pub summary: PathBuf,
    pub max_workers: usize,
    pub top_n: usize,
    pub render_output: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".into(),
            data: PathBuf::from("data/classified.json"),
            summary: PathBuf::from("data/summary.json"),
            max_workers: 8,
            top_n: 16,
            render_output: PathBuf::from("data/dashboard.html"),
        }
    }
}

impl AppConfig {
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.harvest.delay_ms, 500);
        assert_eq!(cfg.harvest.max_retries, 3);
        assert_eq!(cfg.harvest.backoff, Backoff::Fixed);
        assert_eq!(cfg.dashboard.top_n, 16);
        assert!(cfg.classify.sub_areas.is_none());
    }

    #[test]
    fn partial_sections_override_only_named_keys() {
        let cfg = AppConfig::from_toml(
            r#"
            [harvest]
            delay_ms = 1200
            backoff = "exponential"

            [harvest.bbox]
            min_lat = 36.4
            max_lat = 36.7
            min_lon = 127.1
            max_lon = 127.4

            [[classify.sub_areas]]
            name = "북측"
            tokens = ["북"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.harvest.delay_ms, 1200);
        assert_eq!(cfg.harvest.backoff, Backoff::Exponential);
        assert_eq!(cfg.harvest.region_code, "3611000000");
        let bbox = cfg.harvest.bbox.unwrap();
        assert!(bbox.contains(36.5, 127.2));
        assert!(!bbox.contains(37.5, 127.2));
        let rules = cfg.classify.sub_areas.unwrap();
        assert_eq!(rules[0].name, "북측");
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = AppConfig::from_toml("[harvest]\ndelay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
