// templates/pages/status.rs

use crate::templates::components::filters::disabled_filter_panel;
use crate::templates::components::{card, placeholder};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Shown while the classified data is still being read. Reloads itself.
pub fn loading_page() -> Markup {
    desktop_layout(
        "Loading…",
        Some(2),
        html! {
            main {
                aside { (disabled_filter_panel()) }
                div {
                    (card("Loading", html! {
                        p { "Reading classified complexes. This page refreshes on its own." }
                    }))
                }
            }
        },
    )
}

/// Terminal load failure: the message, with every interactive panel disabled.
pub fn load_error_page(message: &str) -> Markup {
    desktop_layout(
        "Dashboard unavailable",
        None,
        html! {
            main {
                aside { (disabled_filter_panel()) }
                div {
                    (card("Could not load data", html! {
                        p class="error" { (message) }
                        p { "Run the classifier, then restart the server." }
                    }))
                    div class="charts disabled" {
                        (card("Average price by sub-area", placeholder("No data.")))
                        (card("Complexes by price band", placeholder("No data.")))
                    }
                }
            }
        },
    )
}

pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        None,
        html! {
            main {
                div {}
                (card(&format!("Error {status}"), html! {
                    p { (message) }
                    p { a href="/" { "← Back to the dashboard" } }
                }))
            }
        },
    )
}
