use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission tier of a portal user.
///
/// Serialized exactly as the school API spells it (`school_admin`,
/// `class_teacher`, ...). Unknown strings fail to deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperSuperAdmin,
    SuperAdmin,
    SchoolAdmin,
    Teacher,
    ClassTeacher,
    Bursar,
    Parent,
    Student,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::SuperSuperAdmin,
        Role::SuperAdmin,
        Role::SchoolAdmin,
        Role::Teacher,
        Role::ClassTeacher,
        Role::Bursar,
        Role::Parent,
        Role::Student,
    ];

    /// Wire spelling, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperSuperAdmin => "super_super_admin",
            Role::SuperAdmin => "super_admin",
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
            Role::ClassTeacher => "class_teacher",
            Role::Bursar => "bursar",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Human-readable label for badges and the navbar.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperSuperAdmin => "Platform Owner",
            Role::SuperAdmin => "Administrator",
            Role::SchoolAdmin => "School Admin",
            Role::Teacher => "Teacher",
            Role::ClassTeacher => "Class Teacher",
            Role::Bursar => "Bursar",
            Role::Parent => "Parent",
            Role::Student => "Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed-in user as reported by the school API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "UserRecord")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    first_name: String,
    last_name: String,
    email: String,
    role: Role,
}

impl TryFrom<UserRecord> for User {
    type Error = String;

    fn try_from(r: UserRecord) -> Result<Self, Self::Error> {
        Ok(User {
            id: record_id(r.mongo_id, r.id, "user")?,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            role: r.role,
        })
    }
}

/// Pick a record's identifier. Documents may carry `_id`, an `id` virtual,
/// or both; `_id` wins when both are present.
pub(crate) fn record_id(
    mongo_id: Option<String>,
    id: Option<String>,
    record: &str,
) -> Result<String, String> {
    mongo_id
        .or(id)
        .ok_or_else(|| format!("{record} has neither `_id` nor `id`"))
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Up to two uppercase initials for avatar fallbacks.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .collect::<String>()
            .to_uppercase()
    }
}

/// Current authentication state.
///
/// Only constructible through [`Session::loading`], [`Session::anonymous`]
/// and [`Session::signed_in`]: a session without a user is never
/// authenticated, and a loading session never carries a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<User>,
    is_loading: bool,
}

impl Session {
    /// Initial state while the provider asks the server who we are.
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_loading: false,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }

    /// Build a resolved session from an optional user.
    pub fn resolved(user: Option<User>) -> Self {
        match user {
            Some(u) => Self::signed_in(u),
            None => Self::anonymous(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Body returned by the school API on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    pub user: User,
}
