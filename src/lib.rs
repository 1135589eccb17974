//! Staffdesk - employee records behind a shared login
//!
//! This is the library interface for Staffdesk: configuration, the SQLite
//! store, authentication, and the server-rendered web UI.

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod employees;
pub mod error;
pub mod ui;
pub mod web;

pub use config::Config;
pub use employees::{Employee, EmployeeForm};
pub use error::Error;
