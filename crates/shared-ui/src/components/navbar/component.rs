use dioxus::prelude::*;

/// Sticky bar along the top of the main column.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        header { class: "navbar", {children} }
    }
}
