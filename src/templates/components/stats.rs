use crate::dashboard::AppState;
use crate::domain::logic::group_thousands;
use crate::templates::components::{avg_price_text, card, price_text};
use maud::{html, Markup};

pub fn stats_panel(app: &AppState) -> Markup {
    let stats = &app.view.stats;
    let total = app.data.records.len();

    card(
        "Overview",
        html! {
            p {
                "Showing " strong { (group_thousands(stats.count as u64)) }
                " of " (group_thousands(total as u64)) " complexes "
                @if app.is_filtered() {
                    span class="badge" { "filtered" }
                }
            }
            div class="stats" {
                div class="stat" { "Average price" strong { (avg_price_text(stats.avg_price)) } }
                div class="stat" { "Lowest" strong { (price_text(stats.min_price)) } }
                div class="stat" { "Highest" strong { (price_text(stats.max_price)) } }
                div class="stat" {
                    "Avg price / ㎡"
                    strong {
                        @match stats.avg_price_per_area {
                            Some(v) => { (group_thousands(v.round() as u64)) " 만원" },
                            None => "-",
                        }
                    }
                }
                div class="stat" { "With price" strong { (stats.priced) } }
            }
        },
    )
}
