use dioxus::prelude::*;
use shared_types::{Session, User};

/// Handle to the app-wide session.
///
/// [`SessionState::snapshot`] reflects the last answer the server gave
/// (initial `get_current_user`, then login / logout in this tab). It goes
/// stale if the API token is revoked elsewhere; the next server function
/// call that fails with `Unauthorized` is where that surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    session: Signal<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session: Signal::new(Session::loading()),
        }
    }

    /// Current session. Reading subscribes the caller to changes.
    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    /// Settle the initial lookup. Ignored once the session is resolved so a
    /// slow lookup cannot overwrite a login that happened in the meantime.
    pub fn resolve(&mut self, user: Option<User>) {
        if self.session.peek().is_loading() {
            self.session.set(Session::resolved(user));
        }
    }

    pub fn sign_in(&mut self, user: User) {
        self.session.set(Session::signed_in(user));
    }

    pub fn sign_out(&mut self) {
        self.session.set(Session::anonymous());
    }
}

/// Hook to access the session.
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}

/// Provides [`SessionState`] and asks the server who we are, once.
///
/// Does not suspend: pages that do not care about the session render
/// immediately, guarded pages show their loading state until it resolves.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut state = use_context_provider(SessionState::new);

    use_hook(move || {
        spawn(async move {
            let user = match server::api::get_current_user().await {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "session lookup failed, continuing signed out");
                    None
                }
            };
            state.resolve(user);
        });
    });

    rsx! { {children} }
}
