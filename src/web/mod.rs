//! HTTP server and request plumbing

pub mod cookies;
pub mod server;

pub use server::*;
