//! Add/edit form input and its validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a submitted employee form was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields(Vec<&'static str>),

    #[error("Salary must be a valid number")]
    InvalidSalary(String),
}

/// Raw form fields as submitted by the browser.
///
/// Missing fields deserialize to empty strings so that a partial submission
/// is reported as a validation failure instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub salary: String,
}

/// Validated values ready to be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub department: String,
    pub salary: f64,
}

impl EmployeeForm {
    pub fn new(name: &str, email: &str, department: &str, salary: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            salary: salary.to_string(),
        }
    }

    /// Trim every field, require all four, and parse the salary
    pub fn validate(&self) -> Result<EmployeeInput, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let department = self.department.trim();
        let salary = self.salary.trim();

        let missing: Vec<&'static str> = [
            ("name", name),
            ("email", email),
            ("department", department),
            ("salary", salary),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let salary = parse_salary(salary)?;

        Ok(EmployeeInput {
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            salary,
        })
    }
}

/// Accepts plain decimals, optionally with thousands separators ("52,000.50")
fn parse_salary(raw: &str) -> Result<f64, ValidationError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidSalary(raw.to_string())),
    }
}
