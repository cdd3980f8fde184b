use dioxus::prelude::*;

/// Full-area spinner with a caption.
#[component]
pub fn LoadingPanel(#[props(default = "Loading...".to_string())] caption: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "loading-panel", "aria-busy": "true",
            div { class: "loading-spinner" }
            p { "{caption}" }
        }
    }
}
