use dioxus::prelude::*;

/// Single-line text input with an optional inline error.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![
        Attribute::new("class", "input", None, false),
        Attribute::new(
            "aria-invalid",
            if error.is_some() { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if let Some(message) = error {
                span { class: "input-error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_html;

    #[test]
    fn input_shows_error_text() {
        fn app() -> Element {
            rsx! {
                Input {
                    value: "bad".to_string(),
                    error: Some("Enter a valid email address".to_string()),
                }
            }
        }
        let html = render_html(app);
        assert!(html.contains("Enter a valid email address"));
        assert!(html.contains(r#"aria-invalid="true""#));
    }

    #[test]
    fn valid_input_has_no_error_line() {
        fn app() -> Element {
            rsx! { Input { value: "ada@school.test".to_string() } }
        }
        let html = render_html(app);
        assert!(html.contains(r#"aria-invalid="false""#));
        assert!(!html.contains("input-error"));
    }
}
