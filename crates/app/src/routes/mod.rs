pub mod landing;
pub mod login;
pub mod not_found;
pub mod overview;
pub mod shell;
pub mod teacher;

use dioxus::prelude::*;

use crate::dashboards::Dashboard;
use landing::Landing;
use login::Login;
use not_found::NotFound;
use overview::DashboardOverview;
use shell::DashboardShell;
use teacher::{classes::ClassesPage, subjects::SubjectsPage};

/// Application routes.
///
/// Each dashboard is a layout wrapping its pages in the guarded shell.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },

    #[layout(AdminShell)]
        #[route("/admin")]
        AdminOverview {},
    #[end_layout]

    #[layout(SchoolAdminShell)]
        #[route("/school-admin")]
        SchoolAdminOverview {},
    #[end_layout]

    #[layout(TeacherShell)]
        #[route("/teacher")]
        TeacherOverview {},
        #[route("/teacher/classes")]
        TeacherClasses {},
        #[route("/teacher/subjects")]
        TeacherSubjects {},
    #[end_layout]

    #[layout(StudentShell)]
        #[route("/student")]
        StudentOverview {},
    #[end_layout]

    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// The dashboard this route lives in, if it is a protected page.
    pub fn dashboard(&self) -> Option<Dashboard> {
        match self {
            Route::AdminOverview {} => Some(Dashboard::Admin),
            Route::SchoolAdminOverview {} => Some(Dashboard::SchoolAdmin),
            Route::TeacherOverview {} | Route::TeacherClasses {} | Route::TeacherSubjects {} => {
                Some(Dashboard::Teacher)
            }
            Route::StudentOverview {} => Some(Dashboard::Student),
            Route::Landing {} | Route::Login { .. } | Route::NotFound { .. } => None,
        }
    }

    /// Heading shown in the navbar.
    pub fn page_title(&self) -> &'static str {
        match self {
            Route::AdminOverview {} => "Admin Dashboard",
            Route::SchoolAdminOverview {} => "School Admin Dashboard",
            Route::TeacherOverview {} => "Teacher Dashboard",
            Route::TeacherClasses {} => "My Classes",
            Route::TeacherSubjects {} => "My Subjects",
            Route::StudentOverview {} => "Student Dashboard",
            Route::Landing {} => "Welcome",
            Route::Login { .. } => "Sign In",
            Route::NotFound { .. } => "Not Found",
        }
    }
}

#[component]
fn AdminShell() -> Element {
    rsx! { DashboardShell { dashboard: Dashboard::Admin } }
}

#[component]
fn SchoolAdminShell() -> Element {
    rsx! { DashboardShell { dashboard: Dashboard::SchoolAdmin } }
}

#[component]
fn TeacherShell() -> Element {
    rsx! { DashboardShell { dashboard: Dashboard::Teacher } }
}

#[component]
fn StudentShell() -> Element {
    rsx! { DashboardShell { dashboard: Dashboard::Student } }
}

#[component]
fn AdminOverview() -> Element {
    rsx! { DashboardOverview { dashboard: Dashboard::Admin } }
}

#[component]
fn SchoolAdminOverview() -> Element {
    rsx! { DashboardOverview { dashboard: Dashboard::SchoolAdmin } }
}

#[component]
fn TeacherOverview() -> Element {
    rsx! { DashboardOverview { dashboard: Dashboard::Teacher } }
}

#[component]
fn TeacherClasses() -> Element {
    ClassesPage()
}

#[component]
fn TeacherSubjects() -> Element {
    SubjectsPage()
}

#[component]
fn StudentOverview() -> Element {
    rsx! { DashboardOverview { dashboard: Dashboard::Student } }
}
