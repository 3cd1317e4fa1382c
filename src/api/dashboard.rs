use crate::model::attendance::AttendanceStatus;
use crate::repo::employee::DepartmentCount;
use crate::repo::{AttendanceRepo, EmployeeRepo};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DashboardData {
    #[schema(example = 25)]
    pub total_employees: i64,
    #[schema(example = 480)]
    pub total_attendance_records: i64,
    #[schema(example = 21)]
    pub today_present: i64,
    #[schema(example = 4)]
    pub today_absent: i64,
    pub departments: Vec<DepartmentCount>,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/attendances/dashboard",
    responses(
        (status = 200, description = "Headline counts for today and per department", body = DashboardData),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn dashboard(
    employees: web::Data<EmployeeRepo>,
    attendance: web::Data<AttendanceRepo>,
) -> actix_web::Result<impl Responder> {
    let today = chrono::Local::now().date_naive();

    let data = DashboardData {
        total_employees: employees.count().await?,
        total_attendance_records: attendance.count().await?,
        today_present: attendance.count_on(today, AttendanceStatus::Present).await?,
        today_absent: attendance.count_on(today, AttendanceStatus::Absent).await?,
        departments: employees.department_counts().await?,
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data
    })))
}
