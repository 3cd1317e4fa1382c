use crate::error::{AppError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Closed set of attendance states. Stored as TEXT, also CHECK-constrained
/// in the schema.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E001")]
    pub employee_id: String,

    /// Primary key of the referenced employee row
    #[schema(example = 1)]
    pub employee: i64,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}

/// Attendance row joined with employee details, for list endpoints
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceWithEmployee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceStats {
    #[schema(example = 20)]
    pub total_records: i64,
    #[schema(example = 18)]
    pub present_days: i64,
    #[schema(example = 2)]
    pub absent_days: i64,
}

/// A validated attendance entry, ready to insert. Construction is the only
/// way to obtain one, so every insert has passed field validation and
/// employee-id normalization.
#[derive(Debug)]
pub struct NewAttendance {
    pub employee_id: String,
    pub employee: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Trim surrounding whitespace and uppercase. Applied before any uniqueness
/// comparison so "e001" and "E001 " collide.
pub fn normalize_employee_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl NewAttendance {
    pub fn new(
        employee_id: Option<&str>,
        employee: Option<i64>,
        date: Option<NaiveDate>,
        status: Option<&str>,
    ) -> Result<Self> {
        let employee_id = employee_id.map(normalize_employee_id).unwrap_or_default();
        if employee_id.is_empty() {
            return Err(AppError::validation("employee_id", "Employee ID is required"));
        }

        let employee =
            employee.ok_or_else(|| AppError::validation("employee", "Employee is required"))?;

        let date = date.ok_or_else(|| AppError::validation("date", "Date is required"))?;

        let status = match status {
            None | Some("") => return Err(AppError::validation("status", "Status is required")),
            Some(raw) => AttendanceStatus::from_str(raw).map_err(|_| {
                AppError::validation("status", "Status must be either Present or Absent")
            })?,
        };

        Ok(Self {
            employee_id,
            employee,
            date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn employee_id_is_trimmed_and_uppercased() {
        let rec = NewAttendance::new(Some(" e001 "), Some(1), Some(date()), Some("Present")).unwrap();
        assert_eq!(rec.employee_id, "E001");
        assert_eq!(rec.status, AttendanceStatus::Present);
    }

    #[test]
    fn whitespace_only_employee_id_is_rejected() {
        let err = NewAttendance::new(Some("   "), Some(1), Some(date()), Some("Present")).unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "employee_id", .. }));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            NewAttendance::new(None, Some(1), Some(date()), Some("Present")).unwrap_err(),
            AppError::Validation { field: "employee_id", .. }
        ));
        assert!(matches!(
            NewAttendance::new(Some("E001"), None, Some(date()), Some("Present")).unwrap_err(),
            AppError::Validation { field: "employee", .. }
        ));
        assert!(matches!(
            NewAttendance::new(Some("E001"), Some(1), None, Some("Present")).unwrap_err(),
            AppError::Validation { field: "date", .. }
        ));
        assert!(matches!(
            NewAttendance::new(Some("E001"), Some(1), Some(date()), None).unwrap_err(),
            AppError::Validation { field: "status", .. }
        ));
    }

    #[test]
    fn status_outside_the_enum_is_rejected() {
        let err =
            NewAttendance::new(Some("E001"), Some(1), Some(date()), Some("Late")).unwrap_err();
        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "status");
                assert_eq!(message, "Status must be either Present or Absent");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(AttendanceStatus::from_str("Present").unwrap(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
        assert!(AttendanceStatus::from_str("present").is_err());
    }
}
