//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::employees::{format_salary, Employee};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Build the employee table
pub fn employee_table(employees: &[Employee]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Department").fg(Color::Cyan),
            Cell::new("Salary").fg(Color::Cyan),
        ]);

    for employee in employees {
        table.add_row(vec![
            Cell::new(employee.id),
            Cell::new(&employee.name),
            Cell::new(&employee.email),
            Cell::new(&employee.department),
            Cell::new(format_salary(employee.salary)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print a table of employees
pub fn print_employee_table(employees: &[Employee]) {
    if employees.is_empty() {
        info("No employees found. Add one from the web UI with 'staffdesk serve'");
        return;
    }

    println!("{}", employee_table(employees));
}
