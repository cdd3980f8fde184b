use shared_types::Role;

use crate::routes::Route;

/// Role-specific area of the portal. Each one is rendered by the same
/// shell with its own navigation and allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dashboard {
    Admin,
    SchoolAdmin,
    Teacher,
    Student,
}

/// Icon shown next to a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Overview,
    Classes,
    Subjects,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    pub icon: NavIcon,
}

impl Dashboard {
    pub const ALL: [Dashboard; 4] = [
        Dashboard::Admin,
        Dashboard::SchoolAdmin,
        Dashboard::Teacher,
        Dashboard::Student,
    ];

    /// Roles that may open this dashboard.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Dashboard::Admin => &[Role::SuperSuperAdmin, Role::SuperAdmin],
            Dashboard::SchoolAdmin => &[Role::SchoolAdmin, Role::Bursar],
            Dashboard::Teacher => &[Role::Teacher, Role::ClassTeacher],
            Dashboard::Student => &[Role::Student, Role::Parent],
        }
    }

    pub fn admits(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// The dashboard a user of `role` lands on after signing in.
    pub fn for_role(role: Role) -> Dashboard {
        Self::ALL
            .into_iter()
            .find(|d| d.admits(role))
            .unwrap_or(Dashboard::Student)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dashboard::Admin => "Admin",
            Dashboard::SchoolAdmin => "School Admin",
            Dashboard::Teacher => "Teacher",
            Dashboard::Student => "Student",
        }
    }

    /// One-line pitch used on the landing page.
    pub fn summary(&self) -> &'static str {
        match self {
            Dashboard::Admin => "Oversee every school on the platform and the people who run them.",
            Dashboard::SchoolAdmin => "Run your school: staff, students, fees and the school calendar.",
            Dashboard::Teacher => "See the classes you manage and decide who can join your subjects.",
            Dashboard::Student => "Follow classes, subjects and progress, for students and their parents.",
        }
    }

    pub fn home(&self) -> Route {
        match self {
            Dashboard::Admin => Route::AdminOverview {},
            Dashboard::SchoolAdmin => Route::SchoolAdminOverview {},
            Dashboard::Teacher => Route::TeacherOverview {},
            Dashboard::Student => Route::StudentOverview {},
        }
    }

    /// Sidebar entries, home first.
    pub fn nav_items(&self) -> Vec<NavItem> {
        let mut items = vec![NavItem {
            label: "Overview",
            route: self.home(),
            icon: NavIcon::Overview,
        }];
        if *self == Dashboard::Teacher {
            items.push(NavItem {
                label: "My Classes",
                route: Route::TeacherClasses {},
                icon: NavIcon::Classes,
            });
            items.push(NavItem {
                label: "My Subjects",
                route: Route::TeacherSubjects {},
                icon: NavIcon::Subjects,
            });
        }
        items
    }
}
