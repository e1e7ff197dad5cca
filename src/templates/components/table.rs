use crate::dashboard::{AppState, SortColumn};
use crate::domain::logic::group_thousands;
use crate::domain::ClassifiedRecord;
use crate::templates::components::{area_text, count_text, price_text};
use maud::{html, Markup};

fn band_text(rec: &ClassifiedRecord) -> String {
    rec.price_band
        .map(|b| b.0.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn year_text(rec: &ClassifiedRecord) -> String {
    rec.year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn per_area_text(rec: &ClassifiedRecord) -> String {
    rec.valid_price_per_area()
        .map(group_thousands)
        .unwrap_or_else(|| "-".to_string())
}

fn sort_header(app: &AppState, column: SortColumn) -> Markup {
    let sort = app.query.sort;
    let next = app.query.with_sort(sort.toggle(column));
    html! {
        th {
            a href=(next.href()) {
                (column.label())
                @if sort.column == column {
                    " " (sort.direction.arrow())
                }
            }
        }
    }
}

pub fn record_table(app: &AppState) -> Markup {
    html! {
        div class="table-wrap" {
            table {
                thead {
                    tr {
                        @for column in SortColumn::ALL {
                            (sort_header(app, column))
                        }
                    }
                }
                tbody {
                    @for rec in &app.view.rows {
                        tr {
                            td { (rec.name) }
                            td { (rec.sub_area) }
                            td { (year_text(rec)) }
                            td { (count_text(rec.units)) }
                            td { (price_text(rec.price_median)) }
                            td { (area_text(rec.area_rep)) }
                            td { (per_area_text(rec)) }
                            td { (band_text(rec)) }
                        }
                    }
                }
            }
        }
    }
}

/// Narrow-viewport rendering of the same rows.
pub fn record_cards(app: &AppState) -> Markup {
    html! {
        div class="cards" {
            @for rec in &app.view.rows {
                article class="complex-card" {
                    strong { (rec.name) }
                    dl {
                        dt { "Sub-area" } dd { (rec.sub_area) }
                        dt { "Median price" } dd { (price_text(rec.price_median)) }
                        dt { "Area (㎡)" } dd { (area_text(rec.area_rep)) }
                        dt { "Price / ㎡" } dd { (per_area_text(rec)) }
                        dt { "Built" } dd { (year_text(rec)) }
                        dt { "Units" } dd { (count_text(rec.units)) }
                        dt { "Band" } dd { (band_text(rec)) }
                        @if let Some(address) = &rec.road_address {
                            dt { "Address" } dd { (address) }
                        }
                    }
                }
            }
        }
    }
}
