//! Credential checks and session lifecycle

use std::sync::Arc;
use thiserror::Error;

use crate::auth::jwt::{SessionClaims, TokenSigner};
use crate::auth::password::{hash_password, verify_password_blocking};
use crate::auth::session::{Session, SessionManager};
use crate::config::{AuthConfig, SessionConfig};
use crate::db::UserStore;
use crate::error::{Error, Result};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown user and wrong password are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] Error),
}

#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    sessions: SessionManager,
    signer: Arc<TokenSigner>,
    // Verified against when the username is unknown, so both paths pay
    // the same bcrypt cost.
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(
        users: UserStore,
        signer: Arc<TokenSigner>,
        session: &SessionConfig,
        auth: &AuthConfig,
    ) -> Result<Self> {
        let lifetime = chrono::Duration::try_minutes(session.lifetime_minutes).ok_or_else(|| {
            Error::Config(format!(
                "session.lifetime_minutes out of range: {}",
                session.lifetime_minutes
            ))
        })?;
        let dummy_hash = hash_password("staffdesk-timing-placeholder", auth.password_cost)?;
        Ok(Self {
            users,
            sessions: SessionManager::new(lifetime),
            signer,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Check credentials and open a session on success
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<Session, AuthError> {
        let user = self.users.find_by_username(username).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let matches = verify_password_blocking(password.to_string(), hash).await?;

        match user {
            Some(user) if matches => {
                let session = self.sessions.create_session(user.username).await;
                tracing::info!("User '{}' logged in", session.username);
                Ok(session)
            }
            _ => {
                tracing::warn!("Failed login attempt for '{}'", username);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Close a session. Missing or unknown sessions are a no-op.
    pub async fn logout(&self, session_id: Option<&str>) {
        if let Some(id) = session_id {
            if let Some(session) = self.sessions.get_session(id).await {
                tracing::info!("User '{}' logged out", session.username);
            }
            self.sessions.delete_session(id).await;
        }
    }

    /// Signed cookie value naming the session, valid for one full lifetime
    /// from now. Reissued on every guarded request so the cookie slides
    /// along with the idle timer.
    pub fn issue_token(&self, session: &Session) -> Result<String> {
        let claims = SessionClaims::new(&session.username, &session.id, self.sessions.lifetime());
        self.signer.sign(&claims)
    }

    /// Session id from a cookie token, if the signature checks out.
    /// Does not require the session to still be live.
    pub fn session_id(&self, token: &str) -> Option<String> {
        self.signer
            .verify::<SessionClaims>(token)
            .ok()
            .map(|claims| claims.sid)
    }

    /// Resolve a cookie token to a live session
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let claims: SessionClaims = match self.signer.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                return None;
            }
        };
        let session = self.sessions.get_session(&claims.sid).await?;
        (session.username == claims.sub).then_some(session)
    }
}
