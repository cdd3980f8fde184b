// Standalone components
pub mod avatar;
pub mod badge;
pub mod button;
pub mod card;
pub mod input;
pub mod page_header;
pub mod skeleton;

// Primitive wrappers
pub mod label;
pub mod switch;
pub mod toast;

// Feedback
pub mod callout;
pub mod empty_state;
pub mod loading_panel;

// Shell
pub mod navbar;
pub mod sidebar;

pub use avatar::*;
pub use badge::*;
pub use button::*;
pub use callout::*;
pub use card::*;
pub use empty_state::*;
pub use input::*;
pub use label::*;
pub use loading_panel::*;
pub use navbar::*;
pub use page_header::*;
pub use sidebar::*;
pub use skeleton::*;
pub use switch::*;
pub use toast::*;

/// Render a component tree to HTML for assertions.
#[cfg(test)]
pub(crate) fn render_html(app: fn() -> dioxus::prelude::Element) -> String {
    let mut dom = dioxus::prelude::VirtualDom::new(app);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
