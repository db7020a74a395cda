//! Role-gated access control
//!
//! The gate is evaluated fresh on every role-restricted request: no session or
//! a session with the wrong role sends the caller back to the login page
//! instead of an error status.

use axum::http::HeaderMap;
use axum::response::Redirect;

use crate::auth::models::{Role, SessionUser};
use crate::auth::session::SessionManager;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "placement_session";

/// Extract the session token from the Cookie header, if present
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("Cookie")?.to_str().ok()?;
    for cookie in cookie_header.split(';') {
        if let Some(token) = cookie.trim().strip_prefix(SESSION_COOKIE) {
            if let Some(value) = token.strip_prefix('=') {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Require an active session with the given role
///
/// Returns the authenticated identity, or the redirect the handler must
/// answer with.
pub async fn require_role(
    sessions: &SessionManager,
    headers: &HeaderMap,
    role: Role,
) -> Result<SessionUser, Redirect> {
    let Some(token) = session_token(headers) else {
        return Err(Redirect::to("/login"));
    };

    match sessions.current(&token).await {
        Some(session) if session.user.role == role => Ok(session.user),
        Some(_) => {
            tracing::debug!("session role mismatch, redirecting to login");
            Err(Redirect::to("/login"))
        }
        None => Err(Redirect::to("/login")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Cookie", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_extracted() {
        let headers = headers_with_cookie("placement_session=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; placement_session=tok; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("tok"));
    }

    #[test]
    fn test_no_cookie_header() {
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_unrelated_cookie_ignored() {
        let headers = headers_with_cookie("theme=dark");
        assert!(session_token(&headers).is_none());
    }

    #[tokio::test]
    async fn test_gate_rejects_anonymous() {
        let sessions = SessionManager::new(30);
        let result = require_role(&sessions, &HeaderMap::new(), Role::Student).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_gate_rejects_wrong_role() {
        let sessions = SessionManager::new(30);
        let token = sessions
            .login(SessionUser {
                id: 1,
                email: "a@x.com".to_string(),
                role: Role::Student,
            })
            .await;

        let headers = headers_with_cookie(&format!("placement_session={}", token));
        let result = require_role(&sessions, &headers, Role::Recruiter).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_gate_accepts_matching_role() {
        let sessions = SessionManager::new(30);
        let token = sessions
            .login(SessionUser {
                id: 1,
                email: "a@x.com".to_string(),
                role: Role::Student,
            })
            .await;

        let headers = headers_with_cookie(&format!("placement_session={}", token));
        let user = require_role(&sessions, &headers, Role::Student)
            .await
            .expect("gate should pass");
        assert_eq!(user.id, 1);
    }
}
