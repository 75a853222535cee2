//! Typed form inputs for every POST route.
//!
//! Each form deserializes from `application/x-www-form-urlencoded`, keeps
//! every field as text, and is turned into typed fields by `validated`, which
//! collects every problem into one field-error map.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::database::models::{DepartmentFields, JobFields};
use crate::services::{Registration, ServiceError};

const REQUIRED: &str = "This field is required";
const NOT_A_NUMBER: &str = "Must be a whole number";

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn field_errors(result: Result<(), ValidationErrors>) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    if let Err(validation) = result {
        for (field, failures) in validation.field_errors() {
            let message = failures
                .first()
                .and_then(|failure| failure.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| REQUIRED.to_string());
            errors.insert(field.to_string(), message);
        }
    }
    errors
}

fn parse_number<T: FromStr>(
    field: &str,
    value: &str,
    errors: &mut HashMap<String, String>,
) -> Option<T> {
    if value.is_empty() {
        errors.insert(field.to_string(), REQUIRED.to_string());
        return None;
    }
    match value.parse() {
        Ok(number) => Some(number),
        Err(_) => {
            errors.insert(field.to_string(), NOT_A_NUMBER.to_string());
            None
        }
    }
}

/// HTML checkbox semantics: absent, empty, or "false" means unchecked
fn checkbox(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub surname: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    pub age: String,
    #[serde(deserialize_with = "trimmed")]
    pub position: String,
    #[serde(deserialize_with = "trimmed")]
    pub speciality: String,
    #[serde(deserialize_with = "trimmed")]
    pub address: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
}

impl RegistrationForm {
    pub fn validated(self) -> Result<Registration, ServiceError> {
        let mut errors = field_errors(self.validate());
        let age = parse_number::<i32>("age", &self.age, &mut errors);

        match age {
            Some(age) if errors.is_empty() => Ok(Registration {
                email: self.email,
                password: self.password,
                name: self.name,
                surname: self.surname,
                age,
                position: optional(self.position),
                speciality: optional(self.speciality),
                address: optional(self.address),
            }),
            _ => Err(ServiceError::validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
    pub remember_me: Option<String>,
}

/// Credentials ready for verification
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validated(self) -> Result<LoginInput, ServiceError> {
        let errors = field_errors(self.validate());
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let remember_me = checkbox(self.remember_me.as_deref());
        Ok(LoginInput {
            email: self.email,
            password: self.password,
            remember_me,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct JobForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    pub team_leader: String,
    #[serde(deserialize_with = "trimmed")]
    pub work_size: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub collaborators: String,
    #[serde(deserialize_with = "trimmed")]
    pub hazard_category: String,
    pub is_finished: Option<String>,
}

impl JobForm {
    pub fn validated(self) -> Result<JobFields, ServiceError> {
        let mut errors = field_errors(self.validate());
        let team_leader_id = parse_number::<i64>("team_leader", &self.team_leader, &mut errors);
        let work_size = parse_number::<i32>("work_size", &self.work_size, &mut errors);
        let hazard_category =
            parse_number::<i32>("hazard_category", &self.hazard_category, &mut errors);

        match (team_leader_id, work_size, hazard_category) {
            (Some(team_leader_id), Some(work_size), Some(hazard_category)) if errors.is_empty() => {
                Ok(JobFields {
                    team_leader_id,
                    title: self.title,
                    work_size,
                    collaborators: self.collaborators,
                    hazard_category,
                    is_finished: checkbox(self.is_finished.as_deref()),
                })
            }
            _ => Err(ServiceError::validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DepartmentForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    pub chief: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub members: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field is required"))]
    pub email: String,
}

impl DepartmentForm {
    pub fn validated(self) -> Result<DepartmentFields, ServiceError> {
        let mut errors = field_errors(self.validate());
        let chief_id = parse_number::<i64>("chief", &self.chief, &mut errors);

        match chief_id {
            Some(chief_id) if errors.is_empty() => Ok(DepartmentFields {
                title: self.title,
                chief_id,
                members: self.members,
                email: self.email,
            }),
            _ => Err(ServiceError::validation(errors)),
        }
    }
}

/// One input of a form descriptor
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
}

/// What a client needs to render an input form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormDescriptor {
    pub form: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    required: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
    }
}

pub const REGISTRATION_FORM: FormDescriptor = FormDescriptor {
    form: "register",
    title: "Registration",
    fields: &[
        field("email", "Email", "email", true),
        field("surname", "Surname", "text", true),
        field("name", "Name", "text", true),
        field("age", "Age", "number", true),
        field("position", "Work", "text", false),
        field("speciality", "Speciality", "text", false),
        field("address", "Address", "text", false),
        field("password", "Password", "password", true),
    ],
};

pub const LOGIN_FORM: FormDescriptor = FormDescriptor {
    form: "login",
    title: "Log in",
    fields: &[
        field("email", "Login", "email", true),
        field("password", "Password", "password", true),
        field("remember_me", "Remember me?", "checkbox", false),
    ],
};

pub const JOB_FORM: FormDescriptor = FormDescriptor {
    form: "job",
    title: "Adding job",
    fields: &[
        field("title", "Job Title", "text", true),
        field("team_leader", "Team Leader id", "number", true),
        field("work_size", "Work Size", "number", true),
        field("collaborators", "Collaborators", "text", true),
        field("hazard_category", "Hazard category", "number", true),
        field("is_finished", "Is job finished", "checkbox", false),
    ],
};

pub const DEPARTMENT_FORM: FormDescriptor = FormDescriptor {
    form: "department",
    title: "Adding department",
    fields: &[
        field("title", "Department Title", "text", true),
        field("chief", "Chief id", "number", true),
        field("members", "Members", "text", true),
        field("email", "Email", "email", true),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn job_form(work_size: &str) -> JobForm {
        JobForm {
            title: "Deploy solar panels".to_string(),
            team_leader: "1".to_string(),
            work_size: work_size.to_string(),
            collaborators: "2, 3".to_string(),
            hazard_category: "2".to_string(),
            is_finished: None,
        }
    }

    fn field_errors_of(err: ServiceError) -> HashMap<String, String> {
        match err {
            ServiceError::Validation { field_errors, .. } => field_errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn job_form_parses_numbers() {
        let fields = job_form("15").validated().unwrap();
        assert_eq!(fields.work_size, 15);
        assert_eq!(fields.team_leader_id, 1);
        assert!(!fields.is_finished);
    }

    #[test]
    fn job_form_rejects_non_integer() {
        let errors = field_errors_of(job_form("lots").validated().unwrap_err());
        assert_eq!(errors.get("work_size").map(String::as_str), Some(NOT_A_NUMBER));
    }

    #[test]
    fn job_form_reports_every_bad_field() {
        let form = JobForm {
            title: String::new(),
            team_leader: "x".to_string(),
            ..job_form("")
        };

        let errors = field_errors_of(form.validated().unwrap_err());
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("team_leader"));
        assert_eq!(errors.get("work_size").map(String::as_str), Some(REQUIRED));
    }

    #[test]
    fn checkbox_follows_html_semantics() {
        assert!(!checkbox(None));
        assert!(!checkbox(Some("")));
        assert!(!checkbox(Some("false")));
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("on")));
    }

    #[test]
    fn department_form_requires_integer_chief() {
        let form = DepartmentForm {
            title: "Geology".to_string(),
            chief: "two".to_string(),
            members: "2, 3".to_string(),
            email: "geo@mars.org".to_string(),
        };

        let errors = field_errors_of(form.validated().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("chief"));
    }

    #[test]
    fn registration_form_keeps_optional_fields_empty() {
        let form = RegistrationForm {
            email: "a@x.com".to_string(),
            surname: "Watney".to_string(),
            name: "Mark".to_string(),
            age: "37".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };

        let registration = form.validated().unwrap();
        assert_eq!(registration.age, 37);
        assert_eq!(registration.position, None);
    }

    #[test]
    fn registration_form_checks_email_and_age() {
        let form = RegistrationForm {
            email: "not-an-email".to_string(),
            surname: "Watney".to_string(),
            name: "Mark".to_string(),
            age: "old".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };

        let errors = field_errors_of(form.validated().unwrap_err());
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("age"));
    }

    #[test]
    fn login_form_requires_both_fields() {
        let errors = field_errors_of(LoginForm::default().validated().unwrap_err());
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }
}
