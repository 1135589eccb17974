//! Session management

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An authenticated login
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID
    pub id: String,
    /// Username the session was opened for
    pub username: String,
    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the session last accessed
    pub last_accessed: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Create a new session
    pub fn new(username: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Check if the session has been idle longer than `lifetime`
    pub fn is_expired(&self, lifetime: chrono::Duration) -> bool {
        chrono::Utc::now().signed_duration_since(self.last_accessed) > lifetime
    }

    /// Update last accessed time
    pub fn touch(&mut self) {
        self.last_accessed = chrono::Utc::now();
    }
}

/// In-memory session storage with idle expiry
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    lifetime: chrono::Duration,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(lifetime: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> chrono::Duration {
        self.lifetime
    }

    /// Create a new session
    pub async fn create_session(&self, username: String) -> Session {
        let session = Session::new(username);
        let mut sessions = self.sessions.write().await;
        // Opportunistic sweep so abandoned logins do not accumulate.
        sessions.retain(|_, s| !s.is_expired(self.lifetime));
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// Get a live session by ID, refreshing its idle timer
    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            if session.is_expired(self.lifetime) {
                sessions.remove(session_id);
                return None;
            }
            session.touch();
            return Some(session.clone());
        }
        None
    }

    /// Delete a session; unknown ids are ignored
    pub async fn delete_session(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(chrono::Duration::minutes(30))
    }
}
