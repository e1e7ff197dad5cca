use crate::dashboard::sort::{SortColumn, SortDirection, SortState};
use crate::domain::bands::{AreaBand, PriceBand, PRICE_BAND_COUNT};
use crate::domain::ClassifiedRecord;
use crate::errors::ServerError;
use std::collections::BTreeSet;
use url::form_urlencoded;

pub const SUB_AREA_PARAM: &str = "sa";
pub const PRICE_BAND_PARAM: &str = "pb";
pub const AREA_BAND_PARAM: &str = "ab";
pub const FILTERED_PARAM: &str = "f";
pub const SORT_PARAM: &str = "sort";
pub const DIR_PARAM: &str = "dir";

/// Three independent selection sets. What they mean for filtering depends on
/// the full label set of each dimension, see [`FilterState::restricts`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub sub_areas: BTreeSet<String>,
    pub price_bands: BTreeSet<PriceBand>,
    pub area_bands: BTreeSet<AreaBand>,
}

/// The dimensions that actually restrict, resolved once per recompute.
struct Active<'a> {
    sub_areas: Option<&'a BTreeSet<String>>,
    price_bands: Option<&'a BTreeSet<PriceBand>>,
    area_bands: Option<&'a BTreeSet<AreaBand>>,
}

impl Active<'_> {
    fn admits(&self, rec: &ClassifiedRecord) -> bool {
        self.sub_areas.map_or(true, |s| s.contains(&rec.sub_area))
            && self
                .price_bands
                .map_or(true, |s| rec.price_band.is_some_and(|b| s.contains(&b)))
            && self
                .area_bands
                .map_or(true, |s| rec.area_band.is_some_and(|b| s.contains(&b)))
    }
}

impl FilterState {
    /// Every label of every dimension selected.
    pub fn all(sub_area_names: &[String]) -> Self {
        Self {
            sub_areas: sub_area_names.iter().cloned().collect(),
            price_bands: PriceBand::all().collect(),
            area_bands: AreaBand::ALL.into_iter().collect(),
        }
    }

    /// A selection restricts only when it is non-empty and leaves out at least one label.
    /// Empty and full selections both mean "no restriction".
    fn restricts<T: Ord>(selection: &BTreeSet<T>, universe: impl IntoIterator<Item = T>) -> bool {
        !selection.is_empty() && !universe.into_iter().all(|label| selection.contains(&label))
    }

    fn active(&self, sub_area_names: &[String]) -> Active<'_> {
        Active {
            sub_areas: Self::restricts(&self.sub_areas, sub_area_names.iter().cloned())
                .then_some(&self.sub_areas),
            price_bands: Self::restricts(&self.price_bands, PriceBand::all())
                .then_some(&self.price_bands),
            area_bands: Self::restricts(&self.area_bands, AreaBand::ALL)
                .then_some(&self.area_bands),
        }
    }

    pub fn is_restrictive(&self, sub_area_names: &[String]) -> bool {
        let active = self.active(sub_area_names);
        active.sub_areas.is_some() || active.price_bands.is_some() || active.area_bands.is_some()
    }

    pub fn with_sub_areas(&self, sub_areas: BTreeSet<String>) -> Self {
        Self { sub_areas, ..self.clone() }
    }

    pub fn with_price_bands(&self, price_bands: BTreeSet<PriceBand>) -> Self {
        Self { price_bands, ..self.clone() }
    }

    pub fn with_area_bands(&self, area_bands: BTreeSet<AreaBand>) -> Self {
        Self { area_bands, ..self.clone() }
    }
}

/// AND across dimensions, OR within one. Input order is preserved.
pub fn apply_filters<'r>(
    records: &'r [ClassifiedRecord],
    filters: &FilterState,
    sub_area_names: &[String],
) -> Vec<&'r ClassifiedRecord> {
    let active = filters.active(sub_area_names);
    records.iter().filter(|r| active.admits(r)).collect()
}

/// Everything a dashboard request can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub filters: FilterState,
    pub sort: SortState,
}

impl DashboardQuery {
    /// Without `f=1` every checkbox starts selected; the selection
    /// parameters are only read from an explicit form submission.
    pub fn parse(query: Option<&str>, sub_area_names: &[String]) -> Result<Self, ServerError> {
        let mut explicit = FilterState::default();
        let mut submitted = false;
        let mut column = None;
        let mut direction = None;

        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            match key.as_ref() {
                SUB_AREA_PARAM => {
                    explicit.sub_areas.insert(value.into_owned());
                }
                PRICE_BAND_PARAM => {
                    let band = PriceBand::parse(&value).ok_or_else(|| {
                        ServerError::BadRequest(format!(
                            "price band must be 1..={PRICE_BAND_COUNT}, got '{value}'"
                        ))
                    })?;
                    explicit.price_bands.insert(band);
                }
                AREA_BAND_PARAM => {
                    let band = AreaBand::parse(&value).ok_or_else(|| {
                        ServerError::BadRequest(format!("unknown area band '{value}'"))
                    })?;
                    explicit.area_bands.insert(band);
                }
                FILTERED_PARAM => submitted = value == "1",
                SORT_PARAM => {
                    column = Some(SortColumn::parse(&value).ok_or_else(|| {
                        ServerError::BadRequest(format!("unknown sort column '{value}'"))
                    })?);
                }
                DIR_PARAM => {
                    direction = Some(SortDirection::parse(&value).ok_or_else(|| {
                        ServerError::BadRequest(format!("sort direction must be asc or desc, got '{value}'"))
                    })?);
                }
                _ => {}
            }
        }

        let filters = if submitted {
            explicit
        } else {
            FilterState::all(sub_area_names)
        };

        let sort = match column {
            Some(column) => SortState {
                column,
                direction: direction.unwrap_or(SortDirection::Desc),
            },
            None => SortState::default(),
        };

        Ok(Self { filters, sort })
    }

    /// Relative link (`?…`) reproducing this query.
    pub fn href(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        ser.append_pair(FILTERED_PARAM, "1");
        for name in &self.filters.sub_areas {
            ser.append_pair(SUB_AREA_PARAM, name);
        }
        for band in &self.filters.price_bands {
            ser.append_pair(PRICE_BAND_PARAM, &band.0.to_string());
        }
        for band in &self.filters.area_bands {
            ser.append_pair(AREA_BAND_PARAM, band.as_str());
        }
        ser.append_pair(SORT_PARAM, self.sort.column.as_str());
        ser.append_pair(DIR_PARAM, self.sort.direction.as_str());
        format!("?{}", ser.finish())
    }

    pub fn with_filters(&self, filters: FilterState) -> Self {
        Self { filters, sort: self.sort }
    }

    pub fn with_sort(&self, sort: SortState) -> Self {
        Self { filters: self.filters.clone(), sort }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["가락마을", "해밀마을", "기타"].iter().map(|s| s.to_string()).collect()
    }

    fn rec(no: &str, sub_area: &str, band: Option<u8>, area: Option<AreaBand>) -> ClassifiedRecord {
        ClassifiedRecord {
            complex_no: no.into(),
            name: format!("{sub_area} {no}"),
            sub_area: sub_area.into(),
            year: None,
            units: None,
            price_min: None,
            price_max: None,
            price_median: band.map(|b| b as u64 * 10_000),
            area_min: None,
            area_max: None,
            area_rep: None,
            price_per_area: None,
            price_band: band.map(PriceBand),
            area_band: area,
            listing_type: None,
            floor: None,
            orientation: None,
            listing_count: None,
            road_address: None,
        }
    }

    fn dataset() -> Vec<ClassifiedRecord> {
        vec![
            rec("1", "가락마을", Some(1), Some(AreaBand::Small)),
            rec("2", "가락마을", Some(5), Some(AreaBand::Medium)),
            rec("3", "해밀마을", Some(5), Some(AreaBand::Small)),
            rec("4", "해밀마을", Some(10), Some(AreaBand::Large)),
            rec("5", "기타", None, None),
        ]
    }

    fn ids(rows: &[&ClassifiedRecord]) -> Vec<String> {
        rows.iter().map(|r| r.complex_no.clone()).collect()
    }

    #[test]
    fn empty_selection_equals_full_selection() {
        let data = dataset();
        let empty = FilterState::default();
        let full = FilterState::all(&names());

        assert_eq!(apply_filters(&data, &empty, &names()).len(), 5);
        assert_eq!(
            ids(&apply_filters(&data, &empty, &names())),
            ids(&apply_filters(&data, &full, &names()))
        );
        assert!(!empty.is_restrictive(&names()));
        assert!(!full.is_restrictive(&names()));
    }

    #[test]
    fn dimensions_and_together_labels_or_within() {
        let data = dataset();
        let filters = FilterState {
            sub_areas: ["가락마을".to_string(), "해밀마을".to_string()].into(),
            price_bands: [PriceBand(5), PriceBand(10)].into(),
            area_bands: BTreeSet::new(),
        };
        assert_eq!(ids(&apply_filters(&data, &filters, &names())), ["2", "3", "4"]);

        let narrowed = filters.with_area_bands([AreaBand::Small].into());
        assert_eq!(ids(&apply_filters(&data, &narrowed, &names())), ["3"]);
    }

    #[test]
    fn filtering_in_sequence_matches_filtering_at_once() {
        let data = dataset();
        let subsets_a: Vec<BTreeSet<String>> = vec![
            BTreeSet::new(),
            ["가락마을".to_string()].into(),
            ["해밀마을".to_string(), "기타".to_string()].into(),
        ];
        let subsets_b: Vec<BTreeSet<PriceBand>> = vec![
            BTreeSet::new(),
            [PriceBand(5)].into(),
            [PriceBand(1), PriceBand(10)].into(),
        ];

        for a in &subsets_a {
            for b in &subsets_b {
                let only_a = FilterState::default().with_sub_areas(a.clone());
                let only_b = FilterState::default().with_price_bands(b.clone());
                let both = only_a.with_price_bands(b.clone());

                let first: Vec<ClassifiedRecord> = apply_filters(&data, &only_a, &names())
                    .into_iter()
                    .cloned()
                    .collect();
                let sequential = apply_filters(&first, &only_b, &names());
                let combined = apply_filters(&data, &both, &names());
                assert_eq!(ids(&sequential), ids(&combined), "a={a:?} b={b:?}");
            }
        }
    }

    #[test]
    fn unbanded_records_only_show_without_a_band_restriction() {
        let data = dataset();
        let filters = FilterState::default().with_price_bands([PriceBand(1)].into());
        assert_eq!(ids(&apply_filters(&data, &filters, &names())), ["1"]);
    }

    #[test]
    fn no_query_selects_everything() {
        let q = DashboardQuery::parse(None, &names()).unwrap();
        assert_eq!(q.filters, FilterState::all(&names()));
        assert_eq!(q.sort, SortState::default());
    }

    #[test]
    fn submitted_form_with_nothing_checked_is_empty() {
        let q = DashboardQuery::parse(Some("f=1&sort=year&dir=asc"), &names()).unwrap();
        assert_eq!(q.filters, FilterState::default());
        assert_eq!(q.sort.column, SortColumn::Year);
        assert_eq!(q.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn href_parses_back_to_the_same_query() {
        let q = DashboardQuery {
            filters: FilterState {
                sub_areas: ["가락마을".to_string(), "기타".to_string()].into(),
                price_bands: [PriceBand(3)].into(),
                area_bands: [AreaBand::SmallMedium].into(),
            },
            sort: SortState { column: SortColumn::PricePerArea, direction: SortDirection::Asc },
        };
        let href = q.href();
        let parsed = DashboardQuery::parse(href.strip_prefix('?'), &names()).unwrap();
        assert_eq!(parsed, q);
    }

    #[test]
    fn malformed_values_are_bad_requests() {
        for query in ["f=1&pb=11", "f=1&ab=huge", "sort=colour", "sort=name&dir=sideways"] {
            assert!(
                matches!(DashboardQuery::parse(Some(query), &names()), Err(ServerError::BadRequest(_))),
                "{query}"
            );
        }
    }
}
