//! Render-time access decision for protected pages.
//!
//! [`GuardOutcome::evaluate`] is the whole policy. [`RoleGuard`] wires it to
//! the session and the router: it re-evaluates whenever the session
//! changes and performs the login redirect from an effect, at most once
//! per signed-out episode.

use dioxus::prelude::*;
use shared_types::{Role, Session};
use shared_ui::{Callout, CalloutTone, LoadingPanel};

use crate::routes::Route;
use crate::session::use_session;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Session lookup still in flight.
    Loading,
    /// Nobody is signed in; the guard sends them to login.
    Unauthenticated,
    /// Signed in, but the role may not see this page.
    Unauthorized { role: Role },
    Authorized,
}

impl GuardOutcome {
    /// Decide what a protected page shows. An empty `allowed` set admits
    /// any signed-in user.
    pub fn evaluate(session: &Session, allowed: &[Role]) -> Self {
        if session.is_loading() {
            return GuardOutcome::Loading;
        }
        match session.role() {
            None => GuardOutcome::Unauthenticated,
            Some(role) if !allowed.is_empty() && !allowed.contains(&role) => {
                GuardOutcome::Unauthorized { role }
            }
            Some(_) => GuardOutcome::Authorized,
        }
    }
}

/// Fires once per run of consecutive `Unauthenticated` outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RedirectLatch {
    fired: bool,
}

impl RedirectLatch {
    /// Feed the latest outcome; returns `true` when a redirect should happen now.
    pub fn observe(&mut self, outcome: &GuardOutcome) -> bool {
        match outcome {
            GuardOutcome::Unauthenticated if !self.fired => {
                self.fired = true;
                true
            }
            GuardOutcome::Unauthenticated => false,
            _ => {
                self.fired = false;
                false
            }
        }
    }
}

/// Gate `children` behind the session and `allowed` roles.
#[component]
pub fn RoleGuard(allowed: Vec<Role>, children: Element) -> Element {
    let session = use_session();
    let current_path = use_route::<Route>().to_string();
    let mut latch = use_signal(RedirectLatch::default);

    let allowed_for_effect = allowed.clone();
    use_effect(use_reactive((&current_path,), move |(current_path,)| {
        let outcome = GuardOutcome::evaluate(&session.snapshot(), &allowed_for_effect);
        if latch.write().observe(&outcome) {
            tracing::info!(path = %current_path, "not signed in, redirecting to login");
            navigator().push(Route::Login {
                redirect: Some(current_path),
            });
        }
    }));

    let outcome = GuardOutcome::evaluate(&session.snapshot(), &allowed);
    rsx! {
        GuardedContent { outcome, {children} }
    }
}

/// What each outcome looks like. Split from [`RoleGuard`] so it renders
/// without a router.
#[component]
pub fn GuardedContent(outcome: GuardOutcome, children: Element) -> Element {
    match outcome {
        GuardOutcome::Loading => rsx! {
            LoadingPanel { caption: "Checking your session..." }
        },
        GuardOutcome::Unauthenticated => rsx! {},
        GuardOutcome::Unauthorized { role } => {
            let label = role.label();
            rsx! {
                div { class: "access-denied",
                    Callout { tone: CalloutTone::Error, title: "Access denied".to_string(),
                        "Your role ({label}) does not have access to this page."
                    }
                }
            }
        }
        GuardOutcome::Authorized => rsx! { {children} },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::User;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@school.test".into(),
            role,
        }
    }

    const TEACHING: &[Role] = &[Role::Teacher, Role::ClassTeacher];

    #[test]
    fn loading_wins_over_everything() {
        for allowed in [&[][..], TEACHING, &[Role::SuperAdmin][..]] {
            assert_eq!(
                GuardOutcome::evaluate(&Session::loading(), allowed),
                GuardOutcome::Loading
            );
        }
    }

    #[test]
    fn anonymous_is_unauthenticated() {
        assert_eq!(
            GuardOutcome::evaluate(&Session::anonymous(), TEACHING),
            GuardOutcome::Unauthenticated
        );
        assert_eq!(
            GuardOutcome::evaluate(&Session::anonymous(), &[]),
            GuardOutcome::Unauthenticated
        );
    }

    #[test]
    fn role_outside_allowed_set_is_unauthorized() {
        for role in Role::ALL {
            let outcome = GuardOutcome::evaluate(&Session::signed_in(user(*role)), TEACHING);
            if TEACHING.contains(role) {
                assert_eq!(outcome, GuardOutcome::Authorized);
            } else {
                assert_eq!(outcome, GuardOutcome::Unauthorized { role: *role });
            }
        }
    }

    #[test]
    fn empty_allowed_set_admits_any_signed_in_user() {
        assert_eq!(
            GuardOutcome::evaluate(&Session::signed_in(user(Role::Parent)), &[]),
            GuardOutcome::Authorized
        );
    }

    #[test]
    fn redirect_fires_once_per_signed_out_episode() {
        let mut latch = RedirectLatch::default();
        let sequence = [
            GuardOutcome::Loading,
            GuardOutcome::Unauthenticated,
            GuardOutcome::Unauthenticated,
            GuardOutcome::Unauthenticated,
        ];
        let fired = sequence.iter().filter(|o| latch.observe(o)).count();
        assert_eq!(fired, 1);

        // Signing in and out again starts a new episode.
        assert!(!latch.observe(&GuardOutcome::Authorized));
        assert!(latch.observe(&GuardOutcome::Unauthenticated));
    }

    #[test]
    fn unauthorized_and_loading_never_redirect() {
        let mut latch = RedirectLatch::default();
        assert!(!latch.observe(&GuardOutcome::Loading));
        assert!(!latch.observe(&GuardOutcome::Unauthorized {
            role: Role::Student
        }));
        assert!(!latch.observe(&GuardOutcome::Authorized));
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn authorized_renders_children() {
        fn app() -> Element {
            rsx! {
                GuardedContent { outcome: GuardOutcome::Authorized, p { "secret plans" } }
            }
        }
        assert!(render(app).contains("secret plans"));
    }

    #[test]
    fn unauthorized_shows_static_message_only() {
        fn app() -> Element {
            rsx! {
                GuardedContent {
                    outcome: GuardOutcome::Unauthorized { role: Role::Student },
                    p { "secret plans" }
                }
            }
        }
        let html = render(app);
        assert!(html.contains("Access denied"));
        assert!(html.contains("Your role (Student) does not have access to this page."));
        assert!(!html.contains("secret plans"));
    }

    #[test]
    fn loading_and_unauthenticated_hide_children() {
        fn loading() -> Element {
            rsx! {
                GuardedContent { outcome: GuardOutcome::Loading, p { "secret plans" } }
            }
        }
        fn signed_out() -> Element {
            rsx! {
                GuardedContent { outcome: GuardOutcome::Unauthenticated, p { "secret plans" } }
            }
        }
        let html = render(loading);
        assert!(html.contains("Checking your session..."));
        assert!(!html.contains("secret plans"));
        assert!(!render(signed_out).contains("secret plans"));
    }
}
