use dioxus::prelude::*;

/// Centered "nothing here yet" message for empty lists.
#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "empty-state",
            p { class: "empty-state-message", "{message}" }
        }
    }
}
