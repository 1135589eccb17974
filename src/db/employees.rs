//! Employee table access
//!
//! Every operation checks out one pooled connection for its duration; the
//! guard returns it to the pool on drop, including on error paths.

use sqlx::SqlitePool;

use crate::employees::{Employee, EmployeeInput};
use crate::error::{Error, Result};

const SELECT_COLUMNS: &str = "id, name, email, department, salary";

#[derive(Clone)]
pub struct EmployeeStore {
    pool: SqlitePool,
}

impl EmployeeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All employees, oldest first
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        let mut conn = self.pool.acquire().await?;
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(&mut *conn)
        .await?;
        Ok(employees)
    }

    pub async fn get(&self, id: i64) -> Result<Employee> {
        let mut conn = self.pool.acquire().await?;
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        employee.ok_or(Error::EmployeeNotFound(id))
    }

    /// Insert a new employee. The UNIQUE index on `email` rejects collisions
    /// atomically, so concurrent inserts of one address cannot both succeed.
    pub async fn create(&self, input: &EmployeeInput) -> Result<Employee> {
        let mut conn = self.pool.acquire().await?;
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees (name, email, department, salary) VALUES (?, ?, ?, ?) RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.department)
        .bind(input.salary)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, &input.email))?;

        tracing::info!("Created employee {} ({})", employee.id, employee.email);
        Ok(employee)
    }

    /// Replace all fields of an existing employee in a single statement
    pub async fn update(&self, id: i64, input: &EmployeeInput) -> Result<Employee> {
        let mut conn = self.pool.acquire().await?;
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees SET name = ?, email = ?, department = ?, salary = ? WHERE id = ? RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.department)
        .bind(input.salary)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, &input.email))?
        .ok_or(Error::EmployeeNotFound(id))?;

        tracing::info!("Updated employee {}", id);
        Ok(employee)
    }

    /// Remove an employee. Unknown ids are not an error.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Delete of employee {} matched no rows", id);
        } else {
            tracing::info!("Deleted employee {}", id);
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::DuplicateEmail(email.to_string())
        }
        _ => Error::Database(err),
    }
}
