use crate::error::{AppError, Result};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static EMPLOYEE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "created_at": "2024-01-01T09:00:00",
        "updated_at": "2024-01-01T09:00:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}

/// Validated employee payload. Field rules match the per-field validators of
/// the persistence schema: identifier uppercase alphanumeric, email
/// lowercased, names and departments trimmed.
#[derive(Debug)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

pub(crate) fn validate_employee_id(raw: &str) -> Result<String> {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return Err(AppError::validation("employee_id", "Employee ID is required"));
    }
    if !EMPLOYEE_ID_RE.is_match(&value) {
        return Err(AppError::validation(
            "employee_id",
            "Employee ID must contain only letters and numbers",
        ));
    }
    Ok(value)
}

pub(crate) fn validate_full_name(raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation("full_name", "Full name is required"));
    }
    if value.chars().count() < 2 {
        return Err(AppError::validation(
            "full_name",
            "Full name must be at least 2 characters long",
        ));
    }
    Ok(value.to_string())
}

pub(crate) fn validate_email(raw: &str) -> Result<String> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return Err(AppError::validation("email", "Email is required"));
    }
    if !EMAIL_RE.is_match(&value) {
        return Err(AppError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    Ok(value)
}

pub(crate) fn validate_department(raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation("department", "Department is required"));
    }
    Ok(value.to_string())
}

impl NewEmployee {
    pub fn new(employee_id: &str, full_name: &str, email: &str, department: &str) -> Result<Self> {
        Ok(Self {
            employee_id: validate_employee_id(employee_id)?,
            full_name: validate_full_name(full_name)?,
            email: validate_email(email)?,
            department: validate_department(department)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_employee_normalizes_identifier_and_email() {
        let emp = NewEmployee::new(" e001 ", "John Doe", "John.Doe@Company.COM", "Engineering")
            .unwrap();
        assert_eq!(emp.employee_id, "E001");
        assert_eq!(emp.email, "john.doe@company.com");
    }

    #[test]
    fn employee_id_must_be_alphanumeric() {
        let err = NewEmployee::new("E-001", "John Doe", "a@b.com", "Engineering").unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "employee_id", .. }));
    }

    #[test]
    fn short_name_and_bad_email_are_rejected() {
        assert!(matches!(
            NewEmployee::new("E001", " J ", "a@b.com", "Engineering").unwrap_err(),
            AppError::Validation { field: "full_name", .. }
        ));
        assert!(matches!(
            NewEmployee::new("E001", "John Doe", "not-an-email", "Engineering").unwrap_err(),
            AppError::Validation { field: "email", .. }
        ));
        assert!(matches!(
            NewEmployee::new("E001", "John Doe", "a@b.com", "  ").unwrap_err(),
            AppError::Validation { field: "department", .. }
        ));
    }
}
