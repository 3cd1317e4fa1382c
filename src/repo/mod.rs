pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceFilter, AttendanceRepo};
pub use employee::EmployeeRepo;

/// Returns the backend message when `err` is a storage-level unique
/// constraint rejection.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.is_unique_violation() {
            return Some(db_err.message().to_string());
        }
    }
    None
}
