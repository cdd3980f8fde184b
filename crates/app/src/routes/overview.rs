use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle};

use crate::dashboards::Dashboard;
use crate::session::use_session;

/// Home page of a dashboard: who is signed in and where to go next.
#[component]
pub fn DashboardOverview(dashboard: Dashboard) -> Element {
    let session = use_session().snapshot();
    let (name, role) = session
        .user()
        .map(|u| (u.full_name(), u.role.label()))
        .unwrap_or_default();
    let title = format!("{} Dashboard", dashboard.title());
    let summary = dashboard.summary();
    let sections: Vec<_> = dashboard.nav_items().into_iter().skip(1).collect();

    rsx! {
        div { class: "overview-page",
            PageHeader {
                PageTitle { "{title}" }
            }

            Card { class: "welcome-card",
                CardHeader {
                    CardTitle { "Welcome back, {name}" }
                    CardDescription { "Signed in as {role}" }
                }
                CardContent {
                    p { "{summary}" }
                }
            }

            if !sections.is_empty() {
                div { class: "quick-links",
                    for item in sections {
                        Link { key: "{item.label}", to: item.route.clone(), class: "quick-link",
                            Card {
                                CardHeader {
                                    CardTitle { "{item.label}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
