use dioxus::prelude::*;

/// Animated placeholder shown while remote data loads.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![
        Attribute::new("class", "skeleton", None, false),
        Attribute::new("aria-hidden", "true", None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_html;

    #[test]
    fn skeleton_is_hidden_from_screen_readers() {
        fn app() -> Element {
            rsx! { Skeleton {} }
        }
        assert!(render_html(app).contains(r#"aria-hidden="true""#));
    }
}
