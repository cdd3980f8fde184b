use dioxus::prelude::*;
use shared_types::ClassSummary;
use shared_ui::{
    Callout, CalloutTone, Card, CardContent, CardHeader, CardTitle, EmptyState, PageHeader,
    PageTitle, Skeleton,
};

use crate::remote_list::{use_remote_list, ListState};
use crate::teacher_service::{ServerTeacherService, TeacherService};

/// Number of placeholder cards while the list loads.
const SKELETON_COUNT: usize = 3;

/// "My Classes": every class the signed-in teacher manages.
#[component]
pub fn ClassesPage() -> Element {
    let classes = use_remote_list("your classes", || async {
        ServerTeacherService.classes().await
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/teacher.css") }

        div { class: "teacher-page",
            PageHeader {
                PageTitle { "My Classes" }
            }
            ClassesView { state: classes() }
        }
    }
}

#[component]
pub fn ClassesView(state: ListState<ClassSummary>) -> Element {
    match state {
        ListState::Loading => rsx! {
            div { class: "class-grid",
                for _ in 0..SKELETON_COUNT {
                    Card {
                        CardHeader { Skeleton { style: "height: 1.25rem; width: 50%;" } }
                        CardContent { Skeleton { style: "height: 2.5rem; width: 80%;" } }
                    }
                }
            }
        },
        ListState::Failed(message) => rsx! {
            Callout { tone: CalloutTone::Error, title: "Classes unavailable".to_string(),
                "{message}"
            }
        },
        ListState::Loaded(classes) if classes.is_empty() => rsx! {
            EmptyState { message: "You are not managing any classes." }
        },
        ListState::Loaded(classes) => rsx! {
            div { class: "class-grid",
                for summary in classes {
                    ClassCard { key: "{summary.id}", summary: summary.clone() }
                }
            }
        },
    }
}

#[component]
fn ClassCard(summary: ClassSummary) -> Element {
    let students = summary.total_students;
    let subjects = summary.subject_count();

    rsx! {
        Card { class: "class-card",
            CardHeader {
                CardTitle { "{summary.name}" }
            }
            CardContent {
                div { class: "class-stats",
                    span { class: "class-stat", "Students: {students}" }
                    span { class: "class-stat", "Subjects: {subjects}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crate::remote_list::{decode_list, load_list};

    fn render(state: ListState<ClassSummary>) -> String {
        fn app(state: ListState<ClassSummary>) -> Element {
            rsx! { ClassesView { state } }
        }
        let mut dom = VirtualDom::new_with_props(app, state);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn loaded_class_renders_counts() {
        let classes = decode_list(
            r#"[{"_id":"c1","name":"Grade 5A","totalStudents":30,"subjects":[1,2]}]"#,
        )
        .unwrap();
        let html = render(ListState::Loaded(classes));
        assert!(html.contains("Grade 5A"));
        assert!(html.contains("Students: 30"));
        assert!(html.contains("Subjects: 2"));
        assert!(!html.contains("You are not managing any classes."));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render(ListState::Loaded(Vec::new()));
        assert!(html.contains("You are not managing any classes."));
    }

    #[test]
    fn loading_shows_skeletons_only() {
        let html = render(ListState::Loading);
        assert!(html.contains("skeleton"));
        assert!(!html.contains("You are not managing any classes."));
    }

    #[tokio::test]
    async fn object_payload_renders_error_not_empty_state() {
        let notifier = RecordingNotifier::default();
        let state: ListState<ClassSummary> =
            load_list("your classes", async { Ok("{}".to_string()) }, &notifier).await;

        let html = render(state);
        assert!(html.contains("Classes unavailable"));
        assert!(html.contains("Could not load your classes."));
        assert!(!html.contains("You are not managing any classes."));
        assert_eq!(notifier.errors(), 1);
    }
}
