use dioxus::prelude::*;
use shared_ui::{use_toast, ToastOptions, Toasts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient message for the user. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Where fetchers and mutators report outcomes. Passed in explicitly so
/// tests can record what would have been shown.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Enqueues notices as toasts. Dismissal belongs to the toast provider.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: Toasts,
}

impl ToastNotifier {
    pub fn new(toasts: Toasts) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let options = ToastOptions::new();
        match notice.kind {
            NoticeKind::Success => self.toasts.success(notice.message, options),
            NoticeKind::Error => self.toasts.error(notice.message, options),
            NoticeKind::Info => self.toasts.info(notice.message, options),
        }
    }
}

/// Hook returning the toast-backed notifier. Must be under `ToastProvider`.
pub fn use_notifier() -> ToastNotifier {
    ToastNotifier::new(use_toast())
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Notice::success("ok").kind, NoticeKind::Success);
        assert_eq!(Notice::error("no").kind, NoticeKind::Error);
        assert_eq!(Notice::info("fyi").message, "fyi");
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Notice::info("first"));
        notifier.notify(Notice::error("second"));
        let messages: Vec<_> = notifier.notices().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(notifier.errors(), 1);
    }
}
