use dioxus::prelude::*;
use shared_types::SubjectSummary;
use shared_ui::{
    Badge, BadgeVariant, Callout, CalloutTone, Card, CardContent, EmptyState, Label, PageHeader,
    PageTitle, Skeleton, Switch, SwitchThumb,
};
use std::collections::HashSet;

use crate::notify::use_notifier;
use crate::remote_list::{use_remote_list, ListState};
use crate::teacher_service::{ServerTeacherService, TeacherService};
use crate::toggle::{toggle_join_permission, SignalBoard};

/// "My Subjects": subjects the teacher teaches, with the join switch per row.
#[component]
pub fn SubjectsPage() -> Element {
    let subjects = use_remote_list("your subjects", || async {
        ServerTeacherService.subjects().await
    });
    let pending = use_signal(HashSet::<String>::new);
    let notifier = use_notifier();
    let board = SignalBoard {
        list: subjects,
        pending,
    };

    let on_toggle = move |(subject_id, current): (String, bool)| {
        spawn(async move {
            toggle_join_permission(&ServerTeacherService, &notifier, &board, &subject_id, current)
                .await;
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/teacher.css") }

        div { class: "teacher-page",
            PageHeader {
                PageTitle { "My Subjects" }
            }
            SubjectsView {
                state: subjects(),
                pending: pending(),
                on_toggle: on_toggle,
            }
        }
    }
}

#[component]
pub fn SubjectsView(
    state: ListState<SubjectSummary>,
    pending: HashSet<String>,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    match state {
        ListState::Loading => rsx! {
            Card {
                CardContent {
                    div { class: "subject-list",
                        Skeleton { style: "height: 2.5rem;" }
                        Skeleton { style: "height: 2.5rem;" }
                        Skeleton { style: "height: 2.5rem;" }
                    }
                }
            }
        },
        ListState::Failed(message) => rsx! {
            Callout { tone: CalloutTone::Error, title: "Subjects unavailable".to_string(),
                "{message}"
            }
        },
        ListState::Loaded(subjects) if subjects.is_empty() => rsx! {
            EmptyState { message: "No subjects assigned to you yet." }
        },
        ListState::Loaded(subjects) => rsx! {
            Card {
                CardContent {
                    ul { class: "subject-list",
                        for subject in subjects {
                            SubjectRow {
                                key: "{subject.id}",
                                busy: pending.contains(&subject.id),
                                subject: subject.clone(),
                                on_toggle: on_toggle,
                            }
                        }
                    }
                }
            }
        },
    }
}

#[component]
fn SubjectRow(
    subject: SubjectSummary,
    busy: bool,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    let switch_id = format!("join-{}", subject.id);
    let current = subject.allow_student_addition;
    let id = subject.id.clone();

    rsx! {
        li { class: "subject-row",
            div { class: "subject-info",
                span { class: "subject-name", "{subject.name}" }
                if let Some(code) = subject.code.as_ref() {
                    Badge { variant: BadgeVariant::Outline, "{code}" }
                }
                if let Some(class_name) = subject.class_name.as_ref() {
                    span { class: "subject-class", "{class_name}" }
                }
            }
            div { class: "subject-toggle",
                Label { html_for: switch_id.clone(), "Allow students to join" }
                Switch {
                    id: switch_id,
                    checked: Some(current),
                    disabled: busy,
                    on_checked_change: move |_: bool| on_toggle.call((id.clone(), current)),
                    SwitchThumb {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote_list::decode_list;

    #[derive(Clone, PartialEq)]
    struct ViewProps {
        state: ListState<SubjectSummary>,
        pending: HashSet<String>,
    }

    fn render(state: ListState<SubjectSummary>, pending: &[&str]) -> String {
        fn app(props: ViewProps) -> Element {
            rsx! {
                SubjectsView {
                    state: props.state,
                    pending: props.pending,
                    on_toggle: move |_: (String, bool)| {},
                }
            }
        }
        let props = ViewProps {
            state,
            pending: pending.iter().map(|s| s.to_string()).collect(),
        };
        let mut dom = VirtualDom::new_with_props(app, props);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn subjects() -> Vec<SubjectSummary> {
        decode_list(
            r#"[{"_id":"s1","name":"Mathematics","code":"MTH","className":"Grade 5A","allowStudentAddition":false},
                {"_id":"s2","name":"Art","allowStudentAddition":true}]"#,
        )
        .unwrap()
    }

    #[test]
    fn loaded_subjects_render_a_switch_each() {
        let html = render(ListState::Loaded(subjects()), &[]);
        assert!(html.contains("Mathematics"));
        assert!(html.contains("MTH"));
        assert!(html.contains("Grade 5A"));
        assert!(html.contains("Art"));
        assert_eq!(html.matches("Allow students to join").count(), 2);
    }

    /// Opening tag of the element whose id is `join-<subject_id>`.
    fn switch_tag<'a>(html: &'a str, subject_id: &str) -> &'a str {
        let marker = format!(r#"id="join-{subject_id}""#);
        let at = html.find(&marker).unwrap();
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    #[test]
    fn only_the_pending_subject_switch_is_disabled() {
        let html = render(ListState::Loaded(subjects()), &["s1"]);
        let busy = switch_tag(&html, "s1");
        let idle = switch_tag(&html, "s2");
        assert!(busy.contains(" disabled"), "{busy}");
        assert!(!idle.contains(" disabled"), "{idle}");
    }

    #[test]
    fn no_switch_is_disabled_without_pending_work() {
        let html = render(ListState::Loaded(subjects()), &[]);
        assert!(!switch_tag(&html, "s1").contains(" disabled"));
        assert!(!switch_tag(&html, "s2").contains(" disabled"));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render(ListState::Loaded(Vec::new()), &[]);
        assert!(html.contains("No subjects assigned to you yet."));
    }

    #[test]
    fn failure_shows_error_card() {
        let html = render(ListState::Failed("Could not load your subjects.".into()), &[]);
        assert!(html.contains("Subjects unavailable"));
        assert!(!html.contains("No subjects assigned to you yet."));
    }
}
