//! In-memory stores
//!
//! Same semantics as the Postgres stores, including the unique-email
//! constraint and the lack of one on applications. Backs the HTTP test
//! suites, which need a server with no database attached.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::Role;
use crate::error::{Error, Result};
use crate::store::{Applicant, ApplicationStore, Job, JobStore, User, UserStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    jobs: Vec<Job>,
    applications: Vec<ApplicationRow>,
}

struct ApplicationRow {
    id: i32,
    job_id: i32,
    student_id: i32,
}

/// All three stores over shared in-memory tables
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(Error::DuplicateEmail(email.to_string()));
        }
        let user = User {
            id: tables.users.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn create_job(
        &self,
        recruiter_id: i32,
        title: &str,
        description: &str,
        salary: &str,
        location: &str,
    ) -> Result<Job> {
        let mut tables = self.tables.write().await;
        let job = Job {
            id: tables.jobs.len() as i32 + 1,
            title: title.to_string(),
            description: description.to_string(),
            salary: salary.to_string(),
            location: location.to_string(),
            recruiter_id,
        };
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.tables.read().await.jobs.clone())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn apply(&self, job_id: i32, student_id: i32) -> Result<i32> {
        let mut tables = self.tables.write().await;
        let id = tables.applications.last().map(|a| a.id).unwrap_or(0) + 1;
        tables.applications.push(ApplicationRow {
            id,
            job_id,
            student_id,
        });
        Ok(id)
    }

    async fn list_applicants(&self, job_id: i32) -> Result<Vec<Applicant>> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .filter_map(|a| {
                tables
                    .users
                    .iter()
                    .find(|u| u.id == a.student_id)
                    .map(|u| Applicant {
                        name: u.name.clone(),
                        email: u.email.clone(),
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_find() {
        let store = MemoryStore::new();
        let user = store
            .register("A", "a@x.com", "hash", Role::Student)
            .await
            .expect("register failed");
        assert_eq!(user.id, 1);

        let found = store.find_by_email("a@x.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "A");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store
            .register("A", "a@x.com", "hash", Role::Student)
            .await
            .unwrap();

        let result = store.register("B", "a@x.com", "hash2", Role::Recruiter).await;
        assert!(matches!(result, Err(Error::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_not_found() {
        let store = MemoryStore::new();
        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_job_listed_with_recruiter_id() {
        let store = MemoryStore::new();
        let job = store
            .create_job(7, "Engineer", "Builds things", "50000", "Remote")
            .await
            .unwrap();

        let jobs = store.list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, job.id);
        assert_eq!(jobs[0].recruiter_id, 7);
    }

    #[tokio::test]
    async fn test_duplicate_applications_permitted() {
        let store = MemoryStore::new();
        let student = store
            .register("S", "s@x.com", "hash", Role::Student)
            .await
            .unwrap();

        store.apply(1, student.id).await.unwrap();
        store.apply(1, student.id).await.unwrap();

        let applicants = store.list_applicants(1).await.unwrap();
        assert_eq!(applicants.len(), 2);
        assert_eq!(applicants[0].email, "s@x.com");
    }

    #[tokio::test]
    async fn test_applicants_joined_by_job() {
        let store = MemoryStore::new();
        let s1 = store
            .register("S1", "s1@x.com", "hash", Role::Student)
            .await
            .unwrap();
        let s2 = store
            .register("S2", "s2@x.com", "hash", Role::Student)
            .await
            .unwrap();

        store.apply(1, s1.id).await.unwrap();
        store.apply(2, s2.id).await.unwrap();

        let applicants = store.list_applicants(1).await.unwrap();
        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].name, "S1");
    }
}
