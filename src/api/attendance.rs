use crate::error::AppError;
use crate::model::attendance::{
    Attendance, AttendanceWithEmployee, NewAttendance, normalize_employee_id,
};
use crate::repo::{AttendanceFilter, AttendanceRepo};
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "E001", value_type = String)]
    pub employee_id: Option<String>,
    /// Primary key of the employee row being referenced
    #[schema(example = 1, value_type = i64)]
    pub employee: Option<i64>,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
    #[schema(example = "Present", value_type = String)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceQuery {
    /// Day filter, YYYY-MM-DD
    pub date: Option<String>,
    /// Employee identifier filter, case-insensitive
    pub employee_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 2)]
    pub count: usize,
    pub data: Vec<AttendanceWithEmployee>,
}

pub(crate) fn parse_date_param(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation("date", "Invalid date format. Use YYYY-MM-DD"))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendances",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance marked successfully", body = Attendance),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "success": false,
            "message": "Validation failed",
            "errors": { "status": ["Status must be either Present or Absent"] }
        })),
        (status = 409, description = "Duplicate entry for this employee and day", body = Object, example = json!({
            "success": false,
            "message": "Attendance for this employee on this date already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    repo: web::Data<AttendanceRepo>,
    payload: web::Json<CreateAttendance>,
) -> actix_web::Result<impl Responder> {
    let new = NewAttendance::new(
        payload.employee_id.as_deref(),
        payload.employee,
        payload.date,
        payload.status.as_deref(),
    )?;

    let record = repo.create(new).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Attendance marked successfully",
        "data": record
    })))
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendances",
    params(
        ("date" = Option<String>, Query, description = "Filter by day (YYYY-MM-DD)"),
        ("employee_id" = Option<String>, Query, description = "Filter by employee identifier")
    ),
    responses(
        (status = 200, description = "Attendance records", body = AttendanceListResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    repo: web::Data<AttendanceRepo>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = AttendanceFilter {
        date: query.date.as_deref().map(parse_date_param).transpose()?,
        employee_id: query.employee_id.as_deref().map(normalize_employee_id),
    };

    let records = repo.list(&filter).await?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        success: true,
        count: records.len(),
        data: records,
    }))
}

/// Delete attendance record
#[utoipa::path(
    delete,
    path = "/api/attendances/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = Object, example = json!({
            "success": true,
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Attendance record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    repo: web::Data<AttendanceRepo>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Attendance record").into());
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Attendance record deleted successfully"
    })))
}
