use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Credentials submitted from the login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Enter a valid email address"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Body sent to the school API to open or close a subject for self-enrolment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinPermissionRequest {
    pub allow_student_addition: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_permission_uses_api_field_name() {
        let body = JoinPermissionRequest {
            allow_student_addition: true,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"allowStudentAddition":true}"#
        );
    }

    #[cfg(feature = "validation")]
    #[test]
    fn login_request_rejects_bad_email_and_empty_password() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: String::new(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
