// harvester.rs
use crate::config::{BoundingBox, HarvestConfig};
use crate::domain::{ComplexRecord, ListingRow};
use crate::harvester::aggregate::{aggregate_complex, listing_rows};
use crate::harvester::fetch::{Endpoints, Fetch, PortalClient};
use crate::harvester::models::{
    Article, ArticlePage, ComplexDetail, ComplexPage, ComplexSummary, Region, RegionList,
};
use crate::harvester::policy::RequestPolicy;
use crate::harvester::HarvestError;
use chrono::Local;
use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

/// Upper bound on pages per enumeration, in case the portal never says "no more".
const MAX_PAGES: u32 = 200;
/// Consecutive failed pages after which an enumeration gives up.
const MAX_CONSECUTIVE_PAGE_FAILURES: u32 = 2;

pub struct Page<T> {
    pub items: Vec<T>,
    pub more: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HarvestStats {
    pub regions: usize,
    pub complexes: usize,
    pub listings: usize,
    pub skipped_pages: usize,
    pub skipped_complexes: usize,
    pub outside_bbox: usize,
}

#[derive(Debug, Default)]
pub struct HarvestOutput {
    pub complexes: Vec<ComplexRecord>,
    pub listings: Vec<ListingRow>,
    pub stats: HarvestStats,
}

pub struct Harvester<F: Fetch> {
    fetch: F,
    endpoints: Endpoints,
    policy: RequestPolicy,
    root_region: String,
    bbox: Option<BoundingBox>,
}

impl Harvester<PortalClient> {
    pub fn from_config(cfg: &HarvestConfig) -> Result<Self, HarvestError> {
        Ok(Self::new(
            PortalClient::new(cfg)?,
            Endpoints::new(cfg)?,
            RequestPolicy::from_config(cfg),
            cfg.region_code.clone(),
            cfg.bbox,
        ))
    }
}

impl<F: Fetch> Harvester<F> {
    pub fn new(
        fetch: F,
        endpoints: Endpoints,
        policy: RequestPolicy,
        root_region: String,
        bbox: Option<BoundingBox>,
    ) -> Self {
        Self {
            fetch,
            endpoints,
            policy,
            root_region,
            bbox,
        }
    }

    fn get(&self, what: &str, url: &url::Url) -> Result<Value, HarvestError> {
        tracing::debug!("GET {url}");
        self.policy.run(what, || self.fetch.get_json(url))
    }

    /// Sub-regions under the root region. This is the one request whose
    /// failure ends the run: if it cannot be reached there is nothing to harvest.
    pub fn regions(&self) -> Result<Vec<Region>, HarvestError> {
        let url = self.endpoints.region_list(&self.root_region);
        let value = self
            .get("region list", &url)
            .map_err(|e| HarvestError::Unreachable(e.to_string()))?;

        let list: RegionList = serde_json::from_value(value)
            .map_err(|e| HarvestError::UnexpectedShape(format!("region list: {e}")))?;

        if list.region_list.is_empty() {
            tracing::info!("no sub-regions under {}, using it directly", self.root_region);
            return Ok(vec![Region::root(&self.root_region)]);
        }

        Ok(list.region_list)
    }

    pub fn complexes_in_region(&self, cortar_no: &str, stats: &mut HarvestStats) -> Vec<ComplexSummary> {
        let (items, skipped) = paginate(
            &format!("complexes in {cortar_no}"),
            |page| {
                let url = self.endpoints.complexes(cortar_no, page);
                let value = self.get(&format!("complex list {cortar_no} p{page}"), &url)?;
                let parsed: ComplexPage = serde_json::from_value(value)
                    .map_err(|e| HarvestError::UnexpectedShape(format!("complex list: {e}")))?;
                Ok(Page {
                    items: parsed.complex_list,
                    more: parsed.is_more_data,
                })
            },
            |c: &ComplexSummary| c.complex_no.clone(),
        );
        stats.skipped_pages += skipped;
        items
    }

    pub fn complex_detail(&self, complex_no: &str) -> Result<ComplexDetail, HarvestError> {
        let url = self.endpoints.complex_detail(complex_no);
        let value = self.get(&format!("detail {complex_no}"), &url)?;
        ComplexDetail::from_value(value)
            .map_err(|e| HarvestError::UnexpectedShape(format!("complex detail: {e}")))
    }

    pub fn articles(&self, complex_no: &str, stats: &mut HarvestStats) -> Vec<Article> {
        let (items, skipped) = paginate(
            &format!("listings of {complex_no}"),
            |page| {
                let url = self.endpoints.articles(complex_no, page);
                let value = self.get(&format!("listings {complex_no} p{page}"), &url)?;
                let parsed: ArticlePage = serde_json::from_value(value)
                    .map_err(|e| HarvestError::UnexpectedShape(format!("article list: {e}")))?;
                Ok(Page {
                    items: parsed.article_list,
                    more: Some(parsed.is_more_data),
                })
            },
            |a: &Article| a.article_no.clone(),
        );
        stats.skipped_pages += skipped;
        items
    }

    fn outside_bbox(&self, summary: &ComplexSummary) -> bool {
        match (self.bbox, summary.latitude, summary.longitude) {
            (Some(bbox), Some(lat), Some(lon)) => !bbox.contains(lat, lon),
            _ => false,
        }
    }

    /// Walks every region, complex and listing page once.
    pub fn harvest(&self) -> Result<HarvestOutput, HarvestError> {
        let regions = self.regions()?;
        let mut out = HarvestOutput::default();
        out.stats.regions = regions.len();
        tracing::info!("🧵 harvesting {} region(s)", regions.len());

        let mut seen = HashSet::new();

        for region in &regions {
            let cortar_no = region.cortar_no.as_str();
            let summaries = self.complexes_in_region(cortar_no, &mut out.stats);
            tracing::info!("{} ({cortar_no}): {} complexes found", region.label(), summaries.len());

            for summary in summaries {
                if !seen.insert(summary.complex_no.clone()) {
                    continue;
                }
                if self.outside_bbox(&summary) {
                    out.stats.outside_bbox += 1;
                    continue;
                }

                let detail = match self.complex_detail(&summary.complex_no) {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("❌ skipping complex {}: {e}", summary.complex_no);
                        out.stats.skipped_complexes += 1;
                        continue;
                    }
                };

                let articles = self.articles(&summary.complex_no, &mut out.stats);
                let extracted_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                let record = aggregate_complex(cortar_no, &summary, &detail, &articles, &extracted_at);

                tracing::info!(
                    "  - {} ({}): {} listings",
                    record.name.as_deref().unwrap_or("?"),
                    record.complex_no,
                    articles.len()
                );

                out.listings.extend(listing_rows(&record, &articles, &extracted_at));
                out.complexes.push(record);
            }
        }

        out.stats.complexes = out.complexes.len();
        out.stats.listings = out.listings.len();
        Ok(out)
    }
}

/// Requests pages from 1 upward until one is empty, says there is no more,
/// repeats only items already seen, or the page cap is hit.
///
/// A failed page (after the request policy's retries) is skipped; enough
/// consecutive failures end the enumeration. Returns the items and the number
/// of skipped pages.
pub fn paginate<T, K, P, Key>(what: &str, mut fetch_page: P, key: Key) -> (Vec<T>, usize)
where
    P: FnMut(u32) -> Result<Page<T>, HarvestError>,
    Key: Fn(&T) -> K,
    K: Eq + Hash,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0;
    let mut consecutive_failures = 0;
    let mut page = 1;

    while page <= MAX_PAGES {
        match fetch_page(page) {
            Ok(p) => {
                consecutive_failures = 0;

                if p.items.is_empty() {
                    tracing::debug!("🏁 {what}: page {page} empty, stopping");
                    break;
                }

                let before = out.len();
                for item in p.items {
                    if seen.insert(key(&item)) {
                        out.push(item);
                    }
                }
                let fresh = out.len() - before;

                if fresh == 0 {
                    tracing::debug!("🔁 {what}: page {page} repeats earlier items, stopping");
                    break;
                }

                tracing::debug!("✅ {what}: page {page} ({fresh} items)");

                if p.more == Some(false) {
                    break;
                }
            }
            Err(e) => {
                skipped += 1;
                consecutive_failures += 1;
                tracing::warn!("⚠️ {what}: skipping page {page}: {e}");

                if consecutive_failures >= MAX_CONSECUTIVE_PAGE_FAILURES {
                    tracing::warn!("❌ {what}: too many failed pages, giving up");
                    break;
                }
            }
        }
        page += 1;
    }

    (out, skipped)
}
