use crate::error::{AppError, Result};
use crate::model::employee::{Employee, NewEmployee};
use crate::repo::unique_violation;
use crate::utils::db_utils::{SqlValue, build_update_sql, execute_update};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

/// Employee count per department, newest-heavy departments first
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentCount {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 12)]
    pub count: i64,
}

/// Typed handle over the `employees` table. Built once at startup and
/// handed to the API layer as shared state.
#[derive(Clone)]
pub struct EmployeeRepo {
    pool: SqlitePool,
}

impl EmployeeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEmployee) -> Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.employee_id)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.department)
        .execute(&self.pool)
        .await;

        let inserted = match result {
            Ok(res) => res,
            Err(e) => return Err(map_employee_unique(e)),
        };

        self.get(inserted.last_insert_rowid())
            .await?
            .ok_or(AppError::NotFound("Employee"))
    }

    pub async fn list(&self) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    /// Apply a validated partial update. Fields must already be normalized;
    /// the unique indexes still guard employee_id/email collisions.
    pub async fn update(&self, id: i64, fields: Vec<(&'static str, SqlValue)>) -> Result<Employee> {
        let update = build_update_sql("employees", fields, "id", id)?;
        debug!(sql = %update.sql, id, "Updating employee");

        let affected = match execute_update(&self.pool, update).await {
            Ok(affected) => affected,
            Err(AppError::Database(e)) => return Err(map_employee_unique(e)),
            Err(e) => return Err(e),
        };

        if affected == 0 {
            return Err(AppError::NotFound("Employee"));
        }

        self.get(id).await?.ok_or(AppError::NotFound("Employee"))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn department_counts(&self) -> Result<Vec<DepartmentCount>> {
        let counts = sqlx::query_as::<_, DepartmentCount>(
            r#"
            SELECT department, COUNT(*) AS count
            FROM employees
            GROUP BY department
            ORDER BY count DESC, department ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }
}

fn map_employee_unique(e: sqlx::Error) -> AppError {
    match unique_violation(&e) {
        Some(msg) if msg.contains("employees.email") => {
            AppError::Duplicate("Email already exists".into())
        }
        Some(_) => AppError::Duplicate("Employee ID already exists".into()),
        None => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    async fn repo() -> EmployeeRepo {
        EmployeeRepo::new(memory_pool().await)
    }

    #[actix_web::test]
    async fn create_normalizes_and_timestamps() {
        let repo = repo().await;
        let emp = repo
            .create(NewEmployee::new(" e001 ", "John Doe", "John@Company.com", " Engineering ").unwrap())
            .await
            .unwrap();

        assert_eq!(emp.employee_id, "E001");
        assert_eq!(emp.email, "john@company.com");
        assert_eq!(emp.department, "Engineering");
        assert_eq!(emp.created_at, emp.updated_at);
    }

    #[actix_web::test]
    async fn duplicate_identifier_and_email_conflict() {
        let repo = repo().await;
        repo.create(NewEmployee::new("E001", "John Doe", "john@company.com", "Engineering").unwrap())
            .await
            .unwrap();

        // same identifier, different casing on input
        let err = repo
            .create(NewEmployee::new("e001", "Jane Doe", "jane@company.com", "Sales").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(msg) if msg == "Employee ID already exists"));

        let err = repo
            .create(NewEmployee::new("E002", "Jane Doe", "JOHN@company.com", "Sales").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(msg) if msg == "Email already exists"));
    }

    #[actix_web::test]
    async fn update_applies_validated_fields() {
        let repo = repo().await;
        let emp = repo
            .create(NewEmployee::new("E001", "John Doe", "john@company.com", "Engineering").unwrap())
            .await
            .unwrap();

        let updated = repo
            .update(emp.id, vec![("department", SqlValue::String("Sales".into()))])
            .await
            .unwrap();
        assert_eq!(updated.department, "Sales");
        assert_eq!(updated.full_name, "John Doe");

        let err = repo.update(emp.id + 100, vec![("department", SqlValue::String("Sales".into()))])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Employee")));
    }

    #[actix_web::test]
    async fn list_is_newest_first_and_delete_removes() {
        let repo = repo().await;
        repo.create(NewEmployee::new("E001", "John Doe", "john@company.com", "Engineering").unwrap())
            .await
            .unwrap();
        let second = repo
            .create(NewEmployee::new("E002", "Jane Doe", "jane@company.com", "Sales").unwrap())
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].employee_id, "E002");

        assert!(repo.delete(second.id).await.unwrap());
        assert!(!repo.delete(second.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn department_counts_group_and_order() {
        let repo = repo().await;
        for (i, dept) in ["Engineering", "Engineering", "Sales"].iter().enumerate() {
            repo.create(
                NewEmployee::new(
                    &format!("E{:03}", i + 1),
                    "Test Person",
                    &format!("p{i}@company.com"),
                    dept,
                )
                .unwrap(),
            )
            .await
            .unwrap();
        }

        let counts = repo.department_counts().await.unwrap();
        assert_eq!(counts[0].department, "Engineering");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].count, 1);
    }
}
