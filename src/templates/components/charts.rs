use crate::dashboard::{BandSlice, SubAreaBar};
use crate::domain::logic::group_thousands;
use crate::templates::components::{avg_price_text, card, placeholder};
use maud::{html, Markup};
use std::f64::consts::PI;

const BAR_WIDTH: f64 = 640.0;
const LABEL_WIDTH: f64 = 120.0;
const VALUE_WIDTH: f64 = 90.0;
const GROUP_HEIGHT: f64 = 34.0;
const BAR_HEIGHT: f64 = 12.0;

const DONUT_RADIUS: f64 = 60.0;
const DONUT_STROKE: f64 = 28.0;
const DONUT_SIZE: f64 = 180.0;

const PALETTE: [&str; 10] = [
    "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#524ed2", "#4338ca", "#3730a3", "#312e81",
    "#1e1b4b", "#0f0a33",
];

/// Grouped horizontal bars: average price and average price per ㎡ for each
/// sub-area. Each series is scaled to its own maximum.
pub fn sub_area_bar_chart(bars: &[SubAreaBar]) -> Markup {
    if bars.is_empty() {
        return card(
            "Average price by sub-area",
            placeholder("No sub-area has both a price and a price per ㎡ to chart."),
        );
    }

    let max_price = bars.iter().map(|b| b.avg_price).fold(0.0, f64::max);
    let max_ppa = bars.iter().map(|b| b.avg_price_per_area).fold(0.0, f64::max);
    let span = BAR_WIDTH - LABEL_WIDTH - VALUE_WIDTH;
    let height = GROUP_HEIGHT * bars.len() as f64 + 24.0;
    let scaled = |v: f64, max: f64| if max > 0.0 { (v / max * span).max(1.0) } else { 1.0 };

    card(
        "Average price by sub-area",
        html! {
            svg xmlns="http://www.w3.org/2000/svg" role="img"
                viewBox=(format!("0 0 {BAR_WIDTH} {height}")) width="100%"
            {
                rect class="bar-price" x="0" y="4" width="10" height="10" {}
                text x="14" y="13" font-size="11" { "Avg price" }
                rect class="bar-ppa" x="90" y="4" width="10" height="10" {}
                text x="104" y="13" font-size="11" { "Avg price / ㎡ (만원)" }

                @for (i, bar) in bars.iter().enumerate() {
                    @let y = 24.0 + GROUP_HEIGHT * i as f64;
                    @let w_price = scaled(bar.avg_price, max_price);
                    @let w_ppa = scaled(bar.avg_price_per_area, max_ppa);
                    text x="0" y=(y + BAR_HEIGHT + 2.0) font-size="12" { (bar.name) }
                    rect class="bar-price" x=(LABEL_WIDTH) y=(y) width=(w_price) height=(BAR_HEIGHT) {
                        title { (bar.name) ": " (avg_price_text(Some(bar.avg_price))) " (" (bar.count) ")" }
                    }
                    text x=(LABEL_WIDTH + w_price + 4.0) y=(y + BAR_HEIGHT - 2.0) font-size="10" {
                        (avg_price_text(Some(bar.avg_price)))
                    }
                    rect class="bar-ppa" x=(LABEL_WIDTH) y=(y + BAR_HEIGHT + 2.0) width=(w_ppa) height=(BAR_HEIGHT) {}
                    text x=(LABEL_WIDTH + w_ppa + 4.0) y=(y + 2.0 * BAR_HEIGHT) font-size="10" {
                        (group_thousands(bar.avg_price_per_area.round() as u64))
                    }
                }
            }
        },
    )
}

/// Listing count per price band. Only non-empty bands arrive here.
pub fn band_donut(slices: &[BandSlice]) -> Markup {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return card("Complexes by price band", placeholder("No priced complexes to chart."));
    }

    let circumference = 2.0 * PI * DONUT_RADIUS;
    let center = DONUT_SIZE / 2.0;
    let mut offset = 0.0;
    let arcs: Vec<(f64, f64, &'static str)> = slices
        .iter()
        .map(|s| {
            let len = circumference * s.count as f64 / total as f64;
            let arc = (len, offset, PALETTE[(s.band.0 as usize).saturating_sub(1) % PALETTE.len()]);
            offset += len;
            arc
        })
        .collect();

    card(
        "Complexes by price band",
        html! {
            svg xmlns="http://www.w3.org/2000/svg" role="img"
                viewBox=(format!("0 0 {DONUT_SIZE} {DONUT_SIZE}")) width="180" height="180"
            {
                @for (len, start, color) in &arcs {
                    circle cx=(center) cy=(center) r=(DONUT_RADIUS) fill="none"
                        stroke=(color) stroke-width=(DONUT_STROKE)
                        stroke-dasharray=(format!("{len:.3} {:.3}", circumference - len))
                        stroke-dashoffset=(format!("{:.3}", -start))
                        transform=(format!("rotate(-90 {center} {center})")) {}
                }
                text x=(center) y=(center + 5.0) text-anchor="middle" font-size="16" { (total) }
            }
            ul {
                @for (slice, (_, _, color)) in slices.iter().zip(&arcs) {
                    li {
                        span style=(format!("color: {color}")) { "■ " }
                        (slice.label) ": " (slice.count)
                    }
                }
            }
        },
    )
}
