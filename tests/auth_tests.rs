//! Authentication and authorization tests

use placement::auth::{
    hash_password, session_token, verify_password, Role, SessionManager, SessionUser,
};

fn student(id: i32) -> SessionUser {
    SessionUser {
        id,
        email: format!("student{}@example.com", id),
        role: Role::Student,
    }
}

fn recruiter(id: i32) -> SessionUser {
    SessionUser {
        id,
        email: format!("recruiter{}@example.com", id),
        role: Role::Recruiter,
    }
}

#[test]
fn test_role_round_trip() {
    assert_eq!(Role::Student.to_string(), "student");
    assert_eq!(Role::Recruiter.to_string(), "recruiter");
    assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
    assert_eq!("recruiter".parse::<Role>().unwrap(), Role::Recruiter);
}

#[test]
fn test_unknown_role_rejected() {
    assert!("admin".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
}

#[test]
fn test_role_dashboards_differ() {
    assert_ne!(Role::Student.dashboard(), Role::Recruiter.dashboard());
}

#[test]
fn test_password_hash_verifies() {
    let hash = hash_password("p").expect("Failed to hash password");
    assert!(verify_password("p", &hash));
    assert!(!verify_password("q", &hash));
}

#[test]
fn test_password_hash_is_salted() {
    let a = hash_password("same-password").expect("Failed to hash password");
    let b = hash_password("same-password").expect("Failed to hash password");
    assert_ne!(a, b);
    assert!(verify_password("same-password", &a));
    assert!(verify_password("same-password", &b));
}

#[tokio::test]
async fn test_login_creates_session_with_role() {
    let sessions = SessionManager::new(30);
    let token = sessions.login(recruiter(1)).await;

    let session = sessions.current(&token).await.expect("session missing");
    assert_eq!(session.user.role, Role::Recruiter);
    assert_eq!(session.user.id, 1);
}

#[tokio::test]
async fn test_logout_then_current_is_none() {
    let sessions = SessionManager::new(30);
    let token = sessions.login(student(1)).await;

    sessions.logout(&token).await;
    assert!(sessions.current(&token).await.is_none());
}

#[tokio::test]
async fn test_tokens_are_unique_per_login() {
    let sessions = SessionManager::new(30);
    let token1 = sessions.login(student(1)).await;
    let token2 = sessions.login(student(1)).await;
    assert_ne!(token1, token2);
}

#[tokio::test]
async fn test_zero_ttl_expires_immediately() {
    let sessions = SessionManager::new(0);
    let token = sessions.login(student(1)).await;
    assert!(sessions.current(&token).await.is_none());
}

#[tokio::test]
async fn test_session_count_tracks_logins() {
    let sessions = SessionManager::new(30);
    assert_eq!(sessions.session_count().await, 0);

    let token = sessions.login(student(1)).await;
    sessions.login(recruiter(2)).await;
    assert_eq!(sessions.session_count().await, 2);

    sessions.logout(&token).await;
    assert_eq!(sessions.session_count().await, 1);
}

#[test]
fn test_session_token_parsing() {
    use axum::http::{HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    headers.insert(
        "Cookie",
        HeaderValue::from_static("a=1; placement_session=tok-42; b=2"),
    );
    assert_eq!(session_token(&headers).as_deref(), Some("tok-42"));
}
