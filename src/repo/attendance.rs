use crate::error::{AppError, Result};
use crate::model::attendance::{
    Attendance, AttendanceStatus, AttendanceWithEmployee, NewAttendance,
};
use crate::repo::unique_violation;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

/// Optional filters for the attendance listing
#[derive(Debug, Default)]
pub struct AttendanceFilter {
    pub date: Option<NaiveDate>,
    /// Already-normalized employee identifier
    pub employee_id: Option<String>,
}

/// Typed handle over the `attendance` table. Built once at startup and
/// handed to the API layer as shared state.
#[derive(Clone)]
pub struct AttendanceRepo {
    pool: SqlitePool,
}

impl AttendanceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a validated attendance entry. The (employee_id, date) pair is
    /// guarded by a unique index, so the insert is the atomic
    /// check-and-insert; a constraint rejection surfaces as `Duplicate`.
    pub async fn create(&self, new: NewAttendance) -> Result<Attendance> {
        let referenced = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(new.employee)
            .fetch_one(&self.pool)
            .await?;
        if referenced == 0 {
            return Err(AppError::validation("employee", "Employee does not exist"));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, employee, date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.employee_id)
        .bind(new.employee)
        .bind(new.date)
        .bind(new.status)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => self
                .get(res.last_insert_rowid())
                .await?
                .ok_or(AppError::NotFound("Attendance record")),
            Err(e) => {
                if unique_violation(&e).is_some() {
                    return Err(AppError::Duplicate(
                        "Attendance for this employee on this date already exists".into(),
                    ));
                }
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Attendance>> {
        let record = sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    /// List records joined with employee details, newest day first.
    pub async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<AttendanceWithEmployee>> {
        // ---------- build WHERE clause dynamically ----------
        let mut conditions = Vec::new();
        if filter.date.is_some() {
            conditions.push("a.date = ?");
        }
        if filter.employee_id.is_some() {
            conditions.push("a.employee_id = ?");
        }

        let where_clause = if conditions.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT a.id, a.employee_id, e.full_name AS employee_name, e.department,
                   a.date, a.status, a.created_at
            FROM attendance a
            JOIN employees e ON e.id = a.employee
            {where_clause}
            ORDER BY a.date DESC, a.id DESC
            "#
        );
        debug!(sql = %sql, filter = ?filter, "Fetching attendance records");

        let mut query = sqlx::query_as::<_, AttendanceWithEmployee>(&sql);
        if let Some(date) = filter.date {
            query = query.bind(date);
        }
        if let Some(employee_id) = &filter.employee_id {
            query = query.bind(employee_id);
        }

        let records = query.fetch_all(&self.pool).await?;
        Ok(records)
    }

    /// All records for one employee row, optionally narrowed to a single day.
    pub async fn for_employee(
        &self,
        employee: i64,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Attendance>> {
        let records = if let Some(date) = date {
            sqlx::query_as::<_, Attendance>(
                "SELECT * FROM attendance WHERE employee = ? AND date = ? ORDER BY date DESC",
            )
            .bind(employee)
            .bind(date)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Attendance>(
                "SELECT * FROM attendance WHERE employee = ? ORDER BY date DESC",
            )
            .bind(employee)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(records)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn count_on(&self, date: NaiveDate, status: AttendanceStatus) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?",
        )
        .bind(date)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
