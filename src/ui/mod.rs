//! Server-rendered pages: templates, flash notifications, and route handlers

pub mod flash;
pub mod handlers;
pub mod templates;

pub use flash::{Flash, FlashLevel};
pub use handlers::*;
pub use templates::Templates;
