//! Flip a subject's "students may join" flag, one request per subject at a time.

use dioxus::prelude::*;
use shared_types::SubjectSummary;
use std::collections::HashSet;

use crate::notify::{Notice, Notifier};
use crate::remote_list::ListState;
use crate::teacher_service::TeacherService;

/// Local view of the subject list that a toggle reads and writes.
pub trait JoinPermissionBoard {
    /// Mark `subject_id` pending. Returns `false` if it already was.
    fn begin(&self, subject_id: &str) -> bool;
    /// Record the acknowledged value on the local item.
    fn apply(&self, subject_id: &str, allow: bool);
    /// Clear the pending mark.
    fn finish(&self, subject_id: &str);
}

/// Board backed by the subjects page signals.
#[derive(Clone, Copy)]
pub struct SignalBoard {
    pub list: Signal<ListState<SubjectSummary>>,
    pub pending: Signal<HashSet<String>>,
}

impl JoinPermissionBoard for SignalBoard {
    fn begin(&self, subject_id: &str) -> bool {
        let mut pending = self.pending;
        let inserted = pending.write().insert(subject_id.to_string());
        inserted
    }

    fn apply(&self, subject_id: &str, allow: bool) {
        let mut list = self.list;
        list.write()
            .update_item(subject_id, |s| s.allow_student_addition = allow);
    }

    fn finish(&self, subject_id: &str) {
        let mut pending = self.pending;
        pending.write().remove(subject_id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend acknowledged; carries the new value.
    Applied(bool),
    Failed,
    /// Another toggle for the same subject was still in flight.
    Ignored,
}

pub fn success_message(allow: bool) -> &'static str {
    if allow {
        "Joining enabled for this subject."
    } else {
        "Joining disabled for this subject."
    }
}

/// Send `!current` for `subject_id` and update the board only once the
/// backend acknowledges it.
pub async fn toggle_join_permission(
    service: &impl TeacherService,
    notifier: &impl Notifier,
    board: &impl JoinPermissionBoard,
    subject_id: &str,
    current: bool,
) -> ToggleOutcome {
    if !board.begin(subject_id) {
        tracing::debug!(subject_id, "toggle already in flight, ignoring");
        return ToggleOutcome::Ignored;
    }

    let allow = !current;
    let outcome = match service.set_join_permission(subject_id, allow).await {
        Ok(()) => {
            board.apply(subject_id, allow);
            tracing::info!(subject_id, allow, "join permission updated");
            notifier.notify(Notice::success(success_message(allow)));
            ToggleOutcome::Applied(allow)
        }
        Err(e) => {
            tracing::warn!(subject_id, allow, error = %e, "join permission update failed");
            notifier.notify(Notice::error(format!(
                "Could not update joining for this subject. {}",
                e.message
            )));
            ToggleOutcome::Failed
        }
    };

    board.finish(subject_id);
    outcome
}
