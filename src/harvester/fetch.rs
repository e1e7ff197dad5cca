use crate::config::HarvestConfig;
use crate::harvester::HarvestError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// One blocking GET returning parsed JSON. The harvester only talks to the
/// portal through this, so tests can swap in canned responses.
pub trait Fetch {
    fn get_json(&self, url: &Url) -> Result<Value, HarvestError>;
}

pub struct PortalClient {
    client: Client,
}

impl PortalClient {
    pub fn new(cfg: &HarvestConfig) -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&cfg.referer)
                .map_err(|e| HarvestError::Config(format!("bad referer: {e}")))?,
        );

        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| HarvestError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetch for PortalClient {
    fn get_json(&self, url: &Url) -> Result<Value, HarvestError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| HarvestError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| HarvestError::Network(e.to_string()))?;

        if !status.is_success() {
            let snippet: String = text.chars().take(200).collect();
            return Err(HarvestError::Status(status.as_u16(), snippet));
        }

        serde_json::from_str(&text).map_err(|e| HarvestError::JsonParse(e.to_string()))
    }
}

/// Builds portal URLs relative to the configured API root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    real_estate_type: String,
    trade_type: String,
}

impl Endpoints {
    pub fn new(cfg: &HarvestConfig) -> Result<Self, HarvestError> {
        let mut root = cfg.base_url.clone();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base = Url::parse(&root)
            .map_err(|e| HarvestError::Config(format!("bad base_url {root}: {e}")))?;

        Ok(Self {
            base,
            real_estate_type: cfg.real_estate_type.clone(),
            trade_type: cfg.trade_type.clone(),
        })
    }

    fn at(&self, path: &str) -> Url {
        // `path` is always one of the fixed relative paths below, which join cleanly.
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }

    pub fn region_list(&self, cortar_no: &str) -> Url {
        let mut url = self.at("regions/list");
        url.query_pairs_mut().append_pair("cortarNo", cortar_no);
        url
    }

    pub fn complexes(&self, cortar_no: &str, page: u32) -> Url {
        let mut url = self.at("regions/complexes");
        url.query_pairs_mut()
            .append_pair("cortarNo", cortar_no)
            .append_pair("realEstateType", &self.real_estate_type)
            .append_pair("page", &page.to_string());
        url
    }

    pub fn complex_detail(&self, complex_no: &str) -> Url {
        let mut url = self.at(&format!("complexes/{complex_no}"));
        url.query_pairs_mut().append_pair("sameAddressGroup", "false");
        url
    }

    pub fn articles(&self, complex_no: &str, page: u32) -> Url {
        let mut url = self.at(&format!("articles/complex/{complex_no}"));
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("realEstateType", &self.real_estate_type);
            if !self.trade_type.is_empty() {
                q.append_pair("tradeType", &self.trade_type);
            }
            q.append_pair("page", &page.to_string())
                .append_pair("priceType", "RETAIL");
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_the_api_root() {
        let cfg = HarvestConfig {
            base_url: "https://portal.example/api".into(),
            ..HarvestConfig::default()
        };
        let ep = Endpoints::new(&cfg).unwrap();

        assert_eq!(
            ep.region_list("3611000000").as_str(),
            "https://portal.example/api/regions/list?cortarNo=3611000000"
        );
        assert_eq!(
            ep.articles("111", 2).as_str(),
            "https://portal.example/api/articles/complex/111?realEstateType=APT%3AABYG%3AJGC&tradeType=A1&page=2&priceType=RETAIL"
        );
        assert!(ep.complex_detail("9").as_str().ends_with("/api/complexes/9?sameAddressGroup=false"));
    }

    #[test]
    fn empty_trade_type_is_omitted() {
        let cfg = HarvestConfig {
            trade_type: String::new(),
            ..HarvestConfig::default()
        };
        let ep = Endpoints::new(&cfg).unwrap();
        assert!(!ep.articles("1", 1).as_str().contains("tradeType"));
    }

    #[test]
    fn unparsable_base_is_a_config_error() {
        let cfg = HarvestConfig {
            base_url: "not a url".into(),
            ..HarvestConfig::default()
        };
        assert!(matches!(Endpoints::new(&cfg), Err(HarvestError::Config(_))));
    }
}
