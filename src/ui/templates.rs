//! HTML views
//!
//! Templates are compiled into the binary and rendered with minijinja. Names
//! end in `.html` so every interpolated value is HTML-escaped.

use minijinja::{context, Environment};

use crate::employees::{format_salary, Employee, EmployeeForm};
use crate::error::Result;

use super::flash::Flash;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Staffdesk{% endblock %}</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    {% if username %}
    <nav class="bg-gray-800 border-b border-gray-700">
        <div class="container mx-auto px-8 py-4 flex justify-between items-center">
            <a href="/dashboard" class="text-xl font-bold">Staffdesk</a>
            <div class="flex items-center space-x-4">
                <span class="text-gray-400">Signed in as {{ username }}</span>
                <a href="/logout" class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded">Logout</a>
            </div>
        </div>
    </nav>
    {% endif %}
    <div class="container mx-auto px-8 py-8 max-w-5xl">
        {% for flash in flashes %}
        <div class="flash flash-{{ flash.level }} mb-4 px-4 py-3 rounded
            {%- if flash.level == "success" %} bg-green-800
            {%- elif flash.level == "info" %} bg-blue-800
            {%- elif flash.level == "warning" %} bg-yellow-700
            {%- else %} bg-red-800{% endif %}" role="alert">{{ flash.message }}</div>
        {% endfor %}
        {% block content %}{% endblock %}
    </div>
</body>
</html>
"#;

const LOGIN_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Login - Staffdesk{% endblock %}
{% block content %}
<div class="max-w-sm mx-auto mt-16 bg-gray-800 rounded-lg p-8 shadow-xl">
    <h1 class="text-2xl font-bold mb-6">Sign in</h1>
    <form method="post" action="/login" class="space-y-4">
        <div>
            <label for="username" class="block text-sm mb-1">Username</label>
            <input id="username" name="username" type="text" required autofocus
                value="{{ username_value }}"
                class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded focus:outline-none focus:border-blue-500">
        </div>
        <div>
            <label for="password" class="block text-sm mb-1">Password</label>
            <input id="password" name="password" type="password" required
                class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded focus:outline-none focus:border-blue-500">
        </div>
        <button type="submit" class="w-full px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium">Login</button>
    </form>
</div>
{% endblock %}
"#;

const DASHBOARD_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Employees - Staffdesk{% endblock %}
{% block content %}
<header class="mb-8 flex justify-between items-center">
    <div>
        <h2 class="text-3xl font-bold mb-2">Employees</h2>
        <p class="text-gray-400">{{ employees|length }} total</p>
    </div>
    <a href="/add" class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded font-medium">+ Add Employee</a>
</header>
{% if employees %}
<div class="bg-gray-800 rounded-lg overflow-hidden shadow-xl">
    <table class="w-full">
        <thead class="bg-gray-700">
            <tr>
                <th class="px-4 py-3 text-left text-sm font-semibold">ID</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Name</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Email</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Department</th>
                <th class="px-4 py-3 text-right text-sm font-semibold">Salary</th>
                <th class="px-4 py-3 text-left text-sm font-semibold">Actions</th>
            </tr>
        </thead>
        <tbody>
            {% for employee in employees %}
            <tr class="border-b border-gray-700 hover:bg-gray-800">
                <td class="px-4 py-3">{{ employee.id }}</td>
                <td class="px-4 py-3">{{ employee.name }}</td>
                <td class="px-4 py-3">{{ employee.email }}</td>
                <td class="px-4 py-3">{{ employee.department }}</td>
                <td class="px-4 py-3 text-right">{{ employee.salary|salary }}</td>
                <td class="px-4 py-3 space-x-2">
                    <a href="/edit/{{ employee.id }}" class="px-2 py-1 text-xs bg-yellow-600 hover:bg-yellow-700 rounded">Edit</a>
                    <a href="/delete/{{ employee.id }}" class="px-2 py-1 text-xs bg-red-600 hover:bg-red-700 rounded"
                        onclick="return confirm('Delete this employee?')">Delete</a>
                </td>
            </tr>
            {% endfor %}
        </tbody>
    </table>
</div>
{% else %}
<div class="text-center py-12">
    <p class="text-gray-400 text-lg mb-4">No employees yet</p>
</div>
{% endif %}
{% endblock %}
"#;

const EMPLOYEE_FORM_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}{{ action }} Employee - Staffdesk{% endblock %}
{% block content %}
<a href="/dashboard" class="text-blue-400 hover:underline mb-4 inline-block">&larr; Back to Dashboard</a>
<div class="bg-gray-800 rounded-lg p-8 shadow-xl max-w-lg">
    <h1 class="text-2xl font-bold mb-6">{{ action }} Employee</h1>
    <form method="post" action="{% if employee_id %}/edit/{{ employee_id }}{% else %}/add{% endif %}" class="space-y-4">
        {% for field in [["name", "Name", "text"], ["email", "Email", "email"], ["department", "Department", "text"], ["salary", "Salary", "text"]] %}
        <div>
            <label for="{{ field[0] }}" class="block text-sm mb-1">{{ field[1] }}</label>
            <input id="{{ field[0] }}" name="{{ field[0] }}" type="{{ field[2] }}" required
                value="{{ form[field[0]] }}"
                class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded focus:outline-none focus:border-blue-500">
        </div>
        {% endfor %}
        <button type="submit" class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium">Save</button>
    </form>
</div>
{% endblock %}
"#;

const NOT_FOUND_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Not Found - Staffdesk{% endblock %}
{% block content %}
<div class="text-center py-12">
    <h1 class="text-3xl font-bold mb-4">Employee not found</h1>
    <p class="text-gray-400 mb-6">No employee with id {{ id }} exists.</p>
    <a href="/dashboard" class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium">Back to Dashboard</a>
</div>
{% endblock %}
"#;

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("salary", format_salary);
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("login.html", LOGIN_TEMPLATE)?;
        env.add_template("dashboard.html", DASHBOARD_TEMPLATE)?;
        env.add_template("employee_form.html", EMPLOYEE_FORM_TEMPLATE)?;
        env.add_template("not_found.html", NOT_FOUND_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn login(&self, username: &str, flashes: &[Flash]) -> Result<String> {
        let template = self.env.get_template("login.html")?;
        Ok(template.render(context! {
            username_value => username,
            flashes => flashes,
        })?)
    }

    pub fn dashboard(&self, username: &str, employees: &[Employee], flashes: &[Flash]) -> Result<String> {
        let template = self.env.get_template("dashboard.html")?;
        Ok(template.render(context! {
            username => username,
            employees => employees,
            flashes => flashes,
        })?)
    }

    /// Add form when `employee_id` is `None`, edit form otherwise
    pub fn employee_form(
        &self,
        username: &str,
        employee_id: Option<i64>,
        form: &EmployeeForm,
        flashes: &[Flash],
    ) -> Result<String> {
        let template = self.env.get_template("employee_form.html")?;
        let action = if employee_id.is_some() { "Edit" } else { "Add" };
        Ok(template.render(context! {
            username => username,
            action => action,
            employee_id => employee_id,
            form => form,
            flashes => flashes,
        })?)
    }

    pub fn not_found(&self, username: &str, id: i64) -> Result<String> {
        let template = self.env.get_template("not_found.html")?;
        Ok(template.render(context! {
            username => username,
            id => id,
            flashes => Vec::<Flash>::new(),
        })?)
    }
}
