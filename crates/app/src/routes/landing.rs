use dioxus::prelude::*;
use shared_types::FeatureFlags;
use shared_ui::{Card, CardContent, CardHeader, CardTitle};

use crate::dashboards::Dashboard;
use crate::routes::Route;

/// Public landing page. With marketing switched off it forwards to login.
#[component]
pub fn Landing() -> Element {
    let flags: FeatureFlags = use_context();
    let marketing = flags.marketing;

    use_effect(move || {
        if !marketing {
            navigator().replace(Route::Login { redirect: None });
        }
    });

    if !marketing {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/landing.css") }
        LandingContent {}
    }
}

/// Hero, one highlight per dashboard and the sign-in call to action.
#[component]
fn LandingContent() -> Element {
    rsx! {
        div { class: "landing-page",
            section { class: "landing-hero",
                h1 { class: "landing-title", "Everything your school runs on, in one place" }
                p { class: "landing-subtitle",
                    "Classes, subjects and people for administrators, teachers, students and parents."
                }
                Link { to: Route::Login { redirect: None }, class: "landing-cta button",
                    "Sign in"
                }
            }

            Highlights {}
        }
    }
}

/// One card per dashboard with its pitch.
#[component]
fn Highlights() -> Element {
    rsx! {
        section { class: "landing-highlights",
            for dashboard in Dashboard::ALL {
                Card { key: "{dashboard:?}", class: "landing-highlight",
                    CardHeader {
                        CardTitle { {dashboard.title()} }
                    }
                    CardContent {
                        p { {dashboard.summary()} }
                    }
                }
            }
        }
    }
}
