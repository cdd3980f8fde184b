use dioxus::prelude::*;

/// Tone of a [`Callout`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CalloutTone {
    #[default]
    Info,
    Warning,
    Error,
}

impl CalloutTone {
    fn class(&self) -> &'static str {
        match self {
            CalloutTone::Info => "info",
            CalloutTone::Warning => "warning",
            CalloutTone::Error => "error",
        }
    }

    fn role(&self) -> &'static str {
        match self {
            CalloutTone::Error => "alert",
            _ => "status",
        }
    }
}

/// Inline message block for access-denied notes, load failures and hints.
#[component]
pub fn Callout(
    #[props(default)] tone: CalloutTone,
    #[props(default)] title: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "callout",
            "data-tone": tone.class(),
            role: tone.role(),
            if let Some(title) = title {
                p { class: "callout-title", "{title}" }
            }
            div { class: "callout-body", {children} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_html;

    #[test]
    fn error_callout_is_an_alert() {
        fn app() -> Element {
            rsx! {
                Callout { tone: CalloutTone::Error, title: "Access denied".to_string(),
                    "You do not have permission to view this page."
                }
            }
        }
        let html = render_html(app);
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains(r#"data-tone="error""#));
        assert!(html.contains("Access denied"));
    }

    #[test]
    fn info_callout_without_title() {
        fn app() -> Element {
            rsx! { Callout { "Heads up" } }
        }
        let html = render_html(app);
        assert!(html.contains(r#"role="status""#));
        assert!(!html.contains("callout-title"));
    }
}
