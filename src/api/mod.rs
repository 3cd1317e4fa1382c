pub mod attendance;
pub mod dashboard;
pub mod employee;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::model::employee::NewEmployee;
    use crate::repo::EmployeeRepo;
    use sqlx::SqlitePool;

    /// Insert the canonical test employee and return its row id.
    pub(crate) async fn seed_employee(pool: &SqlitePool) -> i64 {
        EmployeeRepo::new(pool.clone())
            .create(NewEmployee::new("E001", "John Doe", "john@company.com", "Engineering").unwrap())
            .await
            .unwrap()
            .id
    }
}
