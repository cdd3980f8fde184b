use crate::dashboards::Dashboard;
use crate::routes::Route;
use crate::session::use_session;
use dioxus::prelude::*;
use shared_types::{AppError, Role};
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input, Label,
};
use std::collections::HashMap;

/// Where to go after signing in.
///
/// Only local paths that name a page the role may open are honoured;
/// anything else falls back to the role's home dashboard.
pub fn safe_redirect(redirect: Option<&str>, role: Role) -> Route {
    let home = Dashboard::for_role(role).home();
    let Some(path) = redirect else {
        return home;
    };
    if !path.starts_with('/') || path.starts_with("//") {
        return home;
    }
    match path.parse::<Route>() {
        Ok(route) => match route.dashboard() {
            Some(dashboard) if dashboard.admits(role) => route,
            _ => home,
        },
        Err(_) => home,
    }
}

/// Login page with email and password.
///
/// Accepts an optional `redirect` query param: after login it navigates
/// there instead of the role's home dashboard. A visitor who is already
/// signed in is sent on immediately.
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    // Store redirect in a signal so closures can read it without moving ownership
    let redirect_target = use_signal(move || redirect);

    let go_to_destination = move |role: Role| {
        let target = safe_redirect(redirect_target.read().as_deref(), role);
        navigator().replace(target);
    };

    use_effect(move || {
        if let Some(role) = session.snapshot().role() {
            go_to_destination(role);
        }
    });

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password()).await {
            Ok(user) => {
                tracing::info!(role = %user.role, "signed in");
                session.sign_in(user);
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/auth.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your school email and password" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Label { html_for: "email", "Email" }
                            Input {
                                input_type: "email",
                                id: "email",
                                placeholder: "you@school.edu",
                                value: email(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                                error: field_errors().get("email").cloned(),
                            }
                        }
                        div { class: "auth-field",
                            Label { html_for: "password", "Password" }
                            Input {
                                input_type: "password",
                                id: "password",
                                placeholder: "Enter your password",
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                                error: field_errors().get("password").cloned(),
                            }
                        }
                        Button {
                            class: "auth-submit",
                            submit: true,
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-link",
                        "New here? "
                        Link { to: Route::Landing {}, "Learn about the portal" }
                    }
                }
            }
        }
    }
}
