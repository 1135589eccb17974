//! Authentication and session management

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod session;

pub use jwt::{SessionClaims, TokenSigner};
pub use middleware::{require_session, CurrentSession};
pub use models::{LoginRequest, User};
pub use service::{AuthError, AuthService};
pub use session::{Session, SessionManager};
