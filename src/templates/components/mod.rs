use crate::domain::logic::{format_price, group_thousands};
use maud::{html, Markup};

pub mod charts;
pub mod filters;
pub mod stats;
pub mod table;

pub use charts::{band_donut, sub_area_bar_chart};
pub use filters::filter_panel;
pub use stats::stats_panel;
pub use table::{record_cards, record_table};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn placeholder(message: &str) -> Markup {
    html! {
        div class="placeholder" { (message) }
    }
}

pub fn no_results() -> Markup {
    html! {
        div class="no-results" {
            p { strong { "No complexes match the current filters." } }
            p { a href="/" { "Clear all filters" } }
        }
    }
}

// Empty cells read as "-" so an absent value is never mistaken for zero.

pub fn price_text(price: Option<u64>) -> String {
    match price.filter(|p| *p > 0) {
        Some(p) => format_price(p),
        None => "-".to_string(),
    }
}

pub fn count_text(n: Option<u32>) -> String {
    n.map(|v| group_thousands(v as u64)).unwrap_or_else(|| "-".to_string())
}

pub fn area_text(area: Option<f64>) -> String {
    area.map(|a| format!("{a:.1}")).unwrap_or_else(|| "-".to_string())
}

pub fn avg_price_text(avg: Option<f64>) -> String {
    price_text(avg.map(|v| v.round() as u64))
}
