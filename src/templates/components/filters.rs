use crate::dashboard::filter::{
    AREA_BAND_PARAM, DIR_PARAM, FILTERED_PARAM, PRICE_BAND_PARAM, SORT_PARAM, SUB_AREA_PARAM,
};
use crate::dashboard::{AppState, DashboardQuery, FilterState};
use crate::domain::bands::{AreaBand, PriceBand};
use crate::templates::components::card;
use maud::{html, Markup};
use std::collections::BTreeSet;

fn quick_select(all: &DashboardQuery, none: &DashboardQuery) -> Markup {
    html! {
        div class="quick" {
            a href=(all.href()) { "All" }
            a href=(none.href()) { "None" }
        }
    }
}

fn checkbox(name: &str, value: &str, label: &str, checked: bool) -> Markup {
    html! {
        label {
            input type="checkbox" name=(name) value=(value) checked[checked];
            " " (label)
        }
    }
}

/// The filter form. Submitting it always sends `f=1` so an all-unchecked
/// dimension is read as an explicit empty selection.
pub fn filter_panel(app: &AppState) -> Markup {
    let q = &app.query;
    let f = &q.filters;
    let names = &app.data.sub_areas;
    let all = FilterState::all(names);

    card(
        "Filters",
        html! {
            form method="get" action="/" {
                input type="hidden" name=(FILTERED_PARAM) value="1";
                input type="hidden" name=(SORT_PARAM) value=(q.sort.column.as_str());
                input type="hidden" name=(DIR_PARAM) value=(q.sort.direction.as_str());

                fieldset {
                    legend { "Sub-area" }
                    (quick_select(
                        &q.with_filters(f.with_sub_areas(all.sub_areas.clone())),
                        &q.with_filters(f.with_sub_areas(BTreeSet::new())),
                    ))
                    @for name in names {
                        (checkbox(SUB_AREA_PARAM, name, name, f.sub_areas.contains(name)))
                    }
                }

                fieldset {
                    legend { "Price band" }
                    (quick_select(
                        &q.with_filters(f.with_price_bands(all.price_bands.clone())),
                        &q.with_filters(f.with_price_bands(BTreeSet::new())),
                    ))
                    @for band in PriceBand::all() {
                        (checkbox(
                            PRICE_BAND_PARAM,
                            &band.0.to_string(),
                            &app.data.band_label(band),
                            f.price_bands.contains(&band),
                        ))
                    }
                }

                fieldset {
                    legend { "Area band" }
                    (quick_select(
                        &q.with_filters(f.with_area_bands(all.area_bands.clone())),
                        &q.with_filters(f.with_area_bands(BTreeSet::new())),
                    ))
                    @for band in AreaBand::ALL {
                        (checkbox(AREA_BAND_PARAM, band.as_str(), band.label(), f.area_bands.contains(&band)))
                    }
                }

                button type="submit" { "Apply" }
            }
        },
    )
}

/// Stand-in shown when there is no data to filter.
pub fn disabled_filter_panel() -> Markup {
    card(
        "Filters",
        html! {
            form class="disabled" {
                fieldset disabled { legend { "Sub-area" } }
                fieldset disabled { legend { "Price band" } }
                fieldset disabled { legend { "Area band" } }
                button type="submit" disabled { "Apply" }
            }
        },
    )
}
