//! Employee records and form validation

mod validation;

pub use validation::{EmployeeForm, EmployeeInput, ValidationError};

use serde::{Deserialize, Serialize};

/// A stored employee row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub salary: f64,
}

impl Employee {
    /// Form pre-filled with this employee's values, for the edit page
    pub fn to_form(&self) -> EmployeeForm {
        EmployeeForm {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            salary: format_salary(self.salary),
        }
    }
}

/// Render a salary without a trailing `.0` for whole amounts
pub fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 && salary.abs() < 1e15 {
        format!("{:.0}", salary)
    } else {
        format!("{:.2}", salary)
    }
}
