use crate::api::attendance::parse_date_param;
use crate::error::AppError;
use crate::model::attendance::{Attendance, AttendanceStats, AttendanceStatus};
use crate::model::employee::{
    Employee, NewEmployee, validate_department, validate_email, validate_employee_id,
    validate_full_name,
};
use crate::repo::{AttendanceRepo, EmployeeRepo};
use crate::utils::db_utils::SqlValue;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: Option<String>,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: Option<String>,
    #[schema(example = "Engineering", value_type = String)]
    pub department: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 10)]
    pub count: usize,
    pub data: Vec<Employee>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeAttendanceResponse {
    pub success: bool,
    pub employee: EmployeeSummary,
    pub statistics: AttendanceStats,
    pub data: Vec<Attendance>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeAttendanceQuery {
    /// Day filter, YYYY-MM-DD
    pub date: Option<String>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Employee ID or email already exists", body = Object, example = json!({
            "success": false,
            "message": "Employee ID already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    repo: web::Data<EmployeeRepo>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let new = NewEmployee::new(
        payload.employee_id.as_deref().unwrap_or(""),
        payload.full_name.as_deref().unwrap_or(""),
        payload.email.as_deref().unwrap_or(""),
        payload.department.as_deref().unwrap_or(""),
    )?;

    let employee = repo.create(new).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Employee created successfully",
        "data": employee
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(repo: web::Data<EmployeeRepo>) -> actix_web::Result<impl Responder> {
    let employees = repo.list().await.map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        e
    })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        success: true,
        count: employees.len(),
        data: employees,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee row ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    repo: web::Data<EmployeeRepo>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = repo
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": employee
    })))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee row ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee ID or email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    repo: web::Data<EmployeeRepo>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    // provided fields go through the same validators as creation
    let mut fields = Vec::new();
    if let Some(raw) = &payload.employee_id {
        fields.push(("employee_id", SqlValue::String(validate_employee_id(raw)?)));
    }
    if let Some(raw) = &payload.full_name {
        fields.push(("full_name", SqlValue::String(validate_full_name(raw)?)));
    }
    if let Some(raw) = &payload.email {
        fields.push(("email", SqlValue::String(validate_email(raw)?)));
    }
    if let Some(raw) = &payload.department {
        fields.push(("department", SqlValue::String(validate_department(raw)?)));
    }

    let employee = repo.update(id, fields).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Employee updated successfully",
        "data": employee
    })))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee row ID")
    ),
    responses(
        (status = 200, description = "Deleted, along with the employee's attendance records", body = Object, example = json!({
            "success": true,
            "message": "Employee E001 deleted successfully"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    repo: web::Data<EmployeeRepo>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = repo
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;
    repo.delete(id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Employee {} deleted successfully", employee.employee_id)
    })))
}

/// Attendance records for one employee, with statistics
#[utoipa::path(
    get,
    path = "/api/employees/{id}/attendances",
    params(
        ("id", Path, description = "Employee row ID"),
        ("date" = Option<String>, Query, description = "Filter by day (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Records and present/absent counts", body = EmployeeAttendanceResponse),
        (status = 400, description = "Invalid date format"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn employee_attendances(
    employees: web::Data<EmployeeRepo>,
    attendance: web::Data<AttendanceRepo>,
    path: web::Path<i64>,
    query: web::Query<EmployeeAttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = employees
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    let date = query.date.as_deref().map(parse_date_param).transpose()?;
    let records = attendance.for_employee(employee.id, date).await?;

    let present_days = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as i64;
    let statistics = AttendanceStats {
        total_records: records.len() as i64,
        present_days,
        absent_days: records.len() as i64 - present_days,
    };

    Ok(HttpResponse::Ok().json(EmployeeAttendanceResponse {
        success: true,
        employee: EmployeeSummary {
            id: employee.id,
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            department: employee.department,
        },
        statistics,
        data: records,
    }))
}
