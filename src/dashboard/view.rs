use crate::dashboard::data::DashboardData;
use crate::dashboard::filter::{apply_filters, DashboardQuery, FilterState};
use crate::dashboard::sort::SortState;
use crate::domain::bands::PriceBand;
use crate::domain::logic::mean_u64;
use crate::domain::ClassifiedRecord;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Statistics panel over the rows currently shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewStats {
    pub count: usize,
    pub priced: usize,
    pub avg_price: Option<f64>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub avg_price_per_area: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubAreaBar {
    pub name: String,
    pub count: usize,
    pub avg_price: f64,
    pub avg_price_per_area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandSlice {
    pub band: PriceBand,
    pub label: String,
    pub count: usize,
}

/// Everything derived from one (filters, sort) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub rows: Vec<ClassifiedRecord>,
    pub stats: ViewStats,
    pub sub_area_bars: Vec<SubAreaBar>,
    pub band_slices: Vec<BandSlice>,
}

impl ViewStats {
    pub fn compute(rows: &[ClassifiedRecord]) -> Self {
        let prices: Vec<u64> = rows.iter().filter_map(|r| r.valid_price()).collect();
        let per_area: Vec<u64> = rows.iter().filter_map(|r| r.valid_price_per_area()).collect();
        ViewStats {
            count: rows.len(),
            priced: prices.len(),
            avg_price: mean_u64(&prices),
            min_price: prices.iter().copied().min(),
            max_price: prices.iter().copied().max(),
            avg_price_per_area: mean_u64(&per_area),
        }
    }
}

/// Sub-areas ranked by average price, at most `top_n` of them.
///
/// Only rows carrying both a valid price and a valid price per area count,
/// for both averages, so the two bars of a group describe the same complexes.
pub fn sub_area_bars(rows: &[ClassifiedRecord], top_n: usize) -> Vec<SubAreaBar> {
    let mut groups: BTreeMap<&str, (Vec<u64>, Vec<u64>)> = BTreeMap::new();
    for rec in rows {
        if let (Some(price), Some(ppa)) = (rec.valid_price(), rec.valid_price_per_area()) {
            let entry = groups.entry(rec.sub_area.as_str()).or_default();
            entry.0.push(price);
            entry.1.push(ppa);
        }
    }

    let mut bars: Vec<SubAreaBar> = groups
        .into_iter()
        .filter_map(|(name, (prices, per_area))| {
            Some(SubAreaBar {
                name: name.to_string(),
                count: prices.len(),
                avg_price: mean_u64(&prices)?,
                avg_price_per_area: mean_u64(&per_area)?,
            })
        })
        .collect();

    bars.sort_by(|a, b| b.avg_price.total_cmp(&a.avg_price).then_with(|| a.name.cmp(&b.name)));
    bars.truncate(top_n);
    bars
}

/// Per-band counts; bands nobody falls into are left out.
pub fn band_slices(rows: &[ClassifiedRecord], data: &DashboardData) -> Vec<BandSlice> {
    PriceBand::all()
        .filter_map(|band| {
            let count = rows.iter().filter(|r| r.price_band == Some(band)).count();
            (count > 0).then(|| BandSlice {
                band,
                label: data.band_label(band),
                count,
            })
        })
        .collect()
}

/// The dashboard's application state: the immutable record set plus the
/// current filters, sort and the view derived from them.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data: Arc<DashboardData>,
    pub query: DashboardQuery,
    pub view: View,
    pub top_n: usize,
}

impl AppState {
    /// Default state: everything selected, sorted by price descending.
    pub fn new(data: Arc<DashboardData>, top_n: usize) -> Self {
        let query = DashboardQuery {
            filters: FilterState::all(&data.sub_areas),
            sort: SortState::default(),
        };
        let view = derive_view(&data, &query, top_n);
        Self { data, query, view, top_n }
    }

    /// Fresh state for `query`, recomputed from the full record set.
    pub fn apply(&self, query: DashboardQuery) -> AppState {
        let view = derive_view(&self.data, &query, self.top_n);
        AppState {
            data: Arc::clone(&self.data),
            query,
            view,
            top_n: self.top_n,
        }
    }

    /// True in the `Ready(filtered)` sense: some dimension actually restricts.
    pub fn is_filtered(&self) -> bool {
        self.query.filters.is_restrictive(&self.data.sub_areas)
    }
}

pub fn derive_view(data: &DashboardData, query: &DashboardQuery, top_n: usize) -> View {
    let mut rows: Vec<ClassifiedRecord> = apply_filters(&data.records, &query.filters, &data.sub_areas)
        .into_iter()
        .cloned()
        .collect();
    query.sort.sort(&mut rows);

    View {
        stats: ViewStats::compute(&rows),
        sub_area_bars: sub_area_bars(&rows, top_n),
        band_slices: band_slices(&rows, data),
        rows,
    }
}
