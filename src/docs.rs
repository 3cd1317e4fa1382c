use crate::api::attendance::{AttendanceListResponse, AttendanceQuery, CreateAttendance};
use crate::api::dashboard::DashboardData;
use crate::api::employee::{
    CreateEmployee, EmployeeAttendanceResponse, EmployeeListResponse, EmployeeSummary,
    UpdateEmployee,
};
use crate::model::attendance::{
    Attendance, AttendanceStats, AttendanceStatus, AttendanceWithEmployee,
};
use crate::model::employee::Employee;
use crate::repo::employee::DepartmentCount;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small HR service for employee and attendance management.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list, view and delete employee profiles
- **Attendance Management**
  - Mark daily attendance (one entry per employee per day), list and correct records
- **Dashboard**
  - Headline counts for today and per-department employee totals

### 📦 Response Format
- JSON-based RESTful responses with a `success` flag

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_attendances,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::dashboard::dashboard
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeListResponse,
            EmployeeSummary,
            EmployeeAttendanceResponse,
            Attendance,
            AttendanceStatus,
            AttendanceStats,
            AttendanceWithEmployee,
            CreateAttendance,
            AttendanceQuery,
            AttendanceListResponse,
            DashboardData,
            DepartmentCount
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
