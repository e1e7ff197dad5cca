use crate::dashboard::AppState;
use crate::templates::components::{
    band_donut, filter_panel, no_results, record_cards, record_table, stats_panel,
    sub_area_bar_chart,
};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn dashboard_page(app: &AppState) -> Markup {
    desktop_layout(
        "Sejong Apartment Dashboard",
        None,
        html! {
            main {
                aside {
                    (filter_panel(app))
                }
                div {
                    (stats_panel(app))

                    div class="charts" {
                        (sub_area_bar_chart(&app.view.sub_area_bars))
                        (band_donut(&app.view.band_slices))
                    }

                    section class="card" {
                        @if app.view.rows.is_empty() {
                            (no_results())
                        } @else {
                            (record_table(app))
                            (record_cards(app))
                        }
                    }
                }
            }
        },
    )
}
