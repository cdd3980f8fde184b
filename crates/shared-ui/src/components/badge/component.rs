use dioxus::prelude::*;

/// Visual variant for badges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Destructive,
    Outline,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "primary",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Success => "success",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Outline => "outline",
        }
    }
}

/// Inline label for roles, counts and statuses.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-style", variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn badge_carries_variant_style() {
        fn app() -> Element {
            rsx! { Badge { variant: BadgeVariant::Success, "Open" } }
        }
        let html = render_html(app);
        assert!(html.contains(r#"data-style="success""#));
        assert!(html.contains("Open"));
    }

    #[test]
    fn badge_variant_classes() {
        assert_eq!(BadgeVariant::default().class(), "primary");
        assert_eq!(BadgeVariant::Destructive.class(), "destructive");
    }
}
