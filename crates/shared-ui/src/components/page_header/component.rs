use dioxus::prelude::*;

/// Page header container holding the page title.
#[component]
pub fn PageHeader(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header", {children} }
    }
}

#[component]
pub fn PageTitle(children: Element) -> Element {
    rsx! {
        h1 { class: "page-title", {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_html;

    #[test]
    fn page_header_wraps_title() {
        fn app() -> Element {
            rsx! {
                PageHeader { PageTitle { "My Subjects" } }
            }
        }
        let html = render_html(app);
        assert!(html.contains("page-title"));
        assert!(html.contains("My Subjects"));
    }
}
