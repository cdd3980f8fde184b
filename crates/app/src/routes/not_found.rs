use dioxus::prelude::*;
use shared_types::Session;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::dashboards::Dashboard;
use crate::routes::Route;
use crate::session::use_session;

/// Where a lost visitor is sent back to, and how the link reads.
pub fn way_back(session: &Session) -> (Route, String) {
    match session.role() {
        Some(role) => {
            let dashboard = Dashboard::for_role(role);
            (
                dashboard.home(),
                format!("Back to the {} dashboard", dashboard.title()),
            )
        }
        None => (Route::Landing {}, "Back to the portal".to_string()),
    }
}

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let session = use_session().snapshot();
    let (back_to, back_label) = way_back(&session);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/auth.css") }
        MissingPage { path: format!("/{}", route.join("/")), back_to: back_to, back_label: back_label }
    }
}

#[component]
fn MissingPage(path: String, back_to: Route, back_label: String) -> Element {
    rsx! {
        div { class: "not-found-page",
            Card { class: "not-found-card",
                CardHeader {
                    div { class: "not-found-code", "404" }
                    CardTitle { "Nothing lives at this address" }
                    CardDescription {
                        code { "{path}" }
                        " is not part of the school portal."
                    }
                }
                CardContent {
                    Link { to: back_to, class: "not-found-link", "{back_label}" }
                }
            }
        }
    }
}
