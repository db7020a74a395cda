//! Persistent storage for users, jobs and applications
//!
//! Handlers talk to the stores through these traits; production uses the
//! Postgres implementation, the HTTP tests run against the in-memory one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::Result;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A registered account
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub recruiter_id: i32,
}

/// A student who applied to a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub email: String,
}

/// Credential store: account rows keyed by unique email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is taken.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Job registry: postings keyed by recruiter
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create_job(
        &self,
        recruiter_id: i32,
        title: &str,
        description: &str,
        salary: &str,
        location: &str,
    ) -> Result<Job>;

    /// Every job ever posted, unfiltered and unpaginated
    async fn list_jobs(&self) -> Result<Vec<Job>>;
}

/// Application ledger: (job, student) pairs
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Unconditional insert; duplicate applications are permitted and the job
    /// id is not validated.
    async fn apply(&self, job_id: i32, student_id: i32) -> Result<i32>;

    /// Name and email of every student who applied, joined across users
    async fn list_applicants(&self, job_id: i32) -> Result<Vec<Applicant>>;
}

/// The full storage surface the handlers depend on
pub trait PlacementStore: UserStore + JobStore + ApplicationStore {}

impl<T: UserStore + JobStore + ApplicationStore> PlacementStore for T {}
