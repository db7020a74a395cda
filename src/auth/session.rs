//! Session management

use crate::auth::models::SessionUser;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token handed to the client as a cookie
    pub token: String,
    /// Identity established at login
    pub user: SessionUser,
    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// When the session was last accessed
    pub last_accessed: chrono::DateTime<chrono::Utc>,
}

impl Session {
    fn new(user: SessionUser) -> Self {
        let now = chrono::Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            user,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Check if the session has been idle past the given expiry
    pub fn is_expired(&self, ttl_minutes: i64) -> bool {
        let now = chrono::Utc::now();
        now.signed_duration_since(self.last_accessed).num_minutes() >= ttl_minutes
    }

    fn touch(&mut self) {
        self.last_accessed = chrono::Utc::now();
    }
}

/// In-memory session store keyed by opaque token
///
/// Injected into handlers through the application state rather than held as a
/// process global, so tests can run isolated instances.
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl_minutes: i64,
}

impl SessionManager {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_minutes,
        }
    }

    /// Establish a session for an authenticated user, returning its token
    pub async fn login(&self, user: SessionUser) -> String {
        let session = Session::new(user);
        let token = session.token.clone();
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Look up the session behind a token, expiring it if idle too long
    pub async fn current(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(token) {
            if session.is_expired(self.ttl_minutes) {
                sessions.remove(token);
                return None;
            }
            session.touch();
            return Some(session.clone());
        }
        None
    }

    /// Destroy a session
    pub async fn logout(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Cleanup expired sessions
    pub async fn cleanup_expired(&self) {
        let ttl = self.ttl_minutes;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired(ttl));
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            ttl_minutes: self.ttl_minutes,
        }
    }
}
