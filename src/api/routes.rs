//! Request handlers

use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::auth::gate::{require_role, session_token, SESSION_COOKIE};
use crate::auth::{hash_password, verify_password, Role, SessionUser};
use crate::error::{Error, Result};
use crate::store::{Applicant, Job};

use super::server::AppState;

// Form bodies

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddJobForm {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyForm {
    #[serde(rename = "jobId")]
    pub job_id: i32,
}

/// Read a static document from the configured public directory
async fn serve_document(state: &AppState, name: &str) -> Result<Html<String>> {
    let path = state.config.server.public_dir.join(name);
    let body = tokio::fs::read_to_string(path).await?;
    Ok(Html(body))
}

fn session_cookie(value: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(value).map_err(|e| Error::Other(e.to_string()))?,
    );
    Ok(headers)
}

// Static entry pages

pub async fn homepage(State(state): State<AppState>) -> Result<Html<String>> {
    serve_document(&state, "homepage.html").await
}

pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>> {
    serve_document(&state, "login.html").await
}

// Accounts and sessions

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let password_hash = hash_password(&form.password)?;
    let user = state
        .store
        .register(&form.name, &form.email, &password_hash, form.role)
        .await?;

    tracing::info!("Registered {} account for {}", user.role, user.email);

    Ok(Redirect::to("/login"))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<(HeaderMap, Redirect)> {
    // One failure message for unknown email and wrong password alike, so a
    // caller cannot probe which emails are registered.
    let user = state
        .store
        .find_by_email(&form.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(&form.password, &user.password_hash) {
        return Err(Error::InvalidCredentials);
    }

    let token = state
        .sessions
        .login(SessionUser {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await;

    tracing::info!("User {} logged in as {}", user.email, user.role);

    let headers = session_cookie(&format!(
        "{}={}; Path=/; HttpOnly",
        SESSION_COOKIE, token
    ))?;
    Ok((headers, Redirect::to(user.role.dashboard())))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Redirect)> {
    if let Some(token) = session_token(&headers) {
        state.sessions.logout(&token).await;
    }

    // Expire the cookie on the client as well
    let headers = session_cookie(&format!(
        "{}=; Path=/; HttpOnly; Max-Age=0",
        SESSION_COOKIE
    ))?;
    Ok((headers, Redirect::to("/login")))
}

// Role-gated dashboards

pub async fn student_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(redirect) = require_role(&state.sessions, &headers, Role::Student).await {
        return redirect.into_response();
    }
    serve_document(&state, "student-dashboard.html")
        .await
        .into_response()
}

pub async fn recruiter_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(redirect) = require_role(&state.sessions, &headers, Role::Recruiter).await {
        return redirect.into_response();
    }
    serve_document(&state, "recruiter-dashboard.html")
        .await
        .into_response()
}

// Jobs and applications

pub async fn add_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddJobForm>,
) -> Response {
    let user = match require_role(&state.sessions, &headers, Role::Recruiter).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    match state
        .store
        .create_job(
            user.id,
            &form.title,
            &form.description,
            &form.salary,
            &form.location,
        )
        .await
    {
        Ok(job) => {
            tracing::info!("Recruiter {} posted job '{}' ({})", user.email, job.title, job.id);
            Redirect::to("/recruiter-dashboard").into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn jobs_available(State(state): State<AppState>) -> Result<Json<Vec<Job>>> {
    Ok(Json(state.store.list_jobs().await?))
}

pub async fn apply_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ApplyForm>,
) -> Response {
    let user = match require_role(&state.sessions, &headers, Role::Student).await {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    match state.store.apply(form.job_id, user.id).await {
        Ok(_) => {
            tracing::info!("Student {} applied to job {}", user.email, form.job_id);
            Redirect::to("/student-dashboard").into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn view_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<i32>,
) -> Result<Json<Vec<Applicant>>> {
    Ok(Json(state.store.list_applicants(job_id).await?))
}

// Probes

pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// Fallback

pub async fn not_found(State(state): State<AppState>) -> Response {
    match serve_document(&state, "404.html").await {
        Ok(body) => (StatusCode::NOT_FOUND, body).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
