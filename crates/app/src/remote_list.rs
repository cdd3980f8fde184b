//! One-shot list loading for pages: fetch on mount, decode, report failures.

use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use shared_types::{AppError, Identified};
use std::fmt;
use std::future::Future;

use crate::notify::{use_notifier, Notice, Notifier};

/// Why a list could not be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// The request itself failed (transport, auth, backend error).
    Rejected(String),
    /// The request succeeded but the body was not a list of the expected items.
    Malformed(String),
}

impl ListError {
    /// Text suitable for the user; decode details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            ListError::Rejected(message) => message,
            ListError::Malformed(_) => "The server sent an unexpected response.",
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Rejected(message) => write!(f, "request failed: {message}"),
            ListError::Malformed(detail) => write!(f, "malformed payload: {detail}"),
        }
    }
}

impl std::error::Error for ListError {}

/// Decode a response body that must be a JSON array of `T`.
///
/// `[]` is a valid, empty list. Anything that is not an array, or an array
/// whose elements do not match `T`, is `Malformed`.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ListError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ListError::Malformed(e.to_string()))?;
    if !value.is_array() {
        return Err(ListError::Malformed(format!(
            "expected an array, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| ListError::Malformed(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// What a list page currently knows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Loading,
    Loaded(Vec<T>),
    /// Load failed; carries the message shown in the error card.
    Failed(String),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Loading
    }
}

impl<T> ListState<T> {
    /// Loaded items; empty while loading or after a failure.
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }
}

impl<T: Identified> ListState<T> {
    /// Apply `update` to the loaded item with `id`. Returns whether one matched.
    pub fn update_item(&mut self, id: &str, update: impl FnOnce(&mut T)) -> bool {
        let ListState::Loaded(items) = self else {
            return false;
        };
        match items.iter_mut().find(|item| item.item_id() == id) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }
}

/// Await `fetch`, decode its body and settle on a state. Failures are
/// logged and reported through `notifier` exactly once.
///
/// `what` names the list in messages, e.g. "your classes".
pub async fn load_list<T, Fut>(what: &str, fetch: Fut, notifier: &impl Notifier) -> ListState<T>
where
    T: DeserializeOwned,
    Fut: Future<Output = Result<String, AppError>>,
{
    let decoded = match fetch.await {
        Ok(body) => decode_list::<T>(&body),
        Err(e) => Err(ListError::Rejected(e.message)),
    };

    match decoded {
        Ok(items) => {
            tracing::debug!(list = what, count = items.len(), "list loaded");
            ListState::Loaded(items)
        }
        Err(err) => {
            tracing::warn!(list = what, error = %err, "failed to load list");
            let message = format!("Could not load {what}. {}", err.user_message());
            notifier.notify(Notice::error(message.clone()));
            ListState::Failed(message)
        }
    }
}

/// Load a list once per mount of the calling component.
///
/// The fetch runs as a task owned by the component, so leaving the page
/// cancels it and nothing is written afterwards.
pub fn use_remote_list<T, F, Fut>(what: &'static str, fetch: F) -> Signal<ListState<T>>
where
    T: DeserializeOwned + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<String, AppError>> + 'static,
{
    let notifier = use_notifier();
    let mut state = use_signal(ListState::<T>::default);

    use_hook(move || {
        spawn(async move {
            let loaded = load_list(what, fetch(), &notifier).await;
            state.set(loaded);
        });
    });

    state
}
