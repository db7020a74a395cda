//! PostgreSQL-backed stores

use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row};

use crate::auth::Role;
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::store::{Applicant, ApplicationStore, Job, JobStore, User, UserStore};

/// All three stores backed by a shared Postgres connection
pub struct PgStore {
    client: Client,
}

impl PgStore {
    /// Connect to the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(&config.connection_string(), NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!(
            "Connected to database '{}' at {}:{}",
            config.dbname,
            config.host,
            config.port
        );

        Ok(Self { client })
    }

    /// Create the tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL,
                    role TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS jobs (
                    id SERIAL PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    salary TEXT NOT NULL,
                    location TEXT NOT NULL,
                    recruiter_id INTEGER NOT NULL
                );
                CREATE TABLE IF NOT EXISTS applications (
                    id SERIAL PRIMARY KEY,
                    job_id INTEGER NOT NULL,
                    student_id INTEGER NOT NULL
                );",
            )
            .await?;
        tracing::info!("Database schema is up to date");
        Ok(())
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password"),
        role: role.parse().map_err(Error::Other)?,
    })
}

fn job_from_row(row: &Row) -> Job {
    Job {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        salary: row.get("salary"),
        location: row.get("location"),
        recruiter_id: row.get("recruiter_id"),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User> {
        let row = self
            .client
            .query_one(
                "INSERT INTO users (name, email, password, role)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, name, email, password, role",
                &[&name, &email, &password_hash, &role.as_str()],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    Error::DuplicateEmail(email.to_string())
                } else {
                    Error::Database(e)
                }
            })?;
        user_from_row(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, name, email, password, role FROM users WHERE email = $1",
                &[&email],
            )
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn create_job(
        &self,
        recruiter_id: i32,
        title: &str,
        description: &str,
        salary: &str,
        location: &str,
    ) -> Result<Job> {
        let row = self
            .client
            .query_one(
                "INSERT INTO jobs (title, description, salary, location, recruiter_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, title, description, salary, location, recruiter_id",
                &[&title, &description, &salary, &location, &recruiter_id],
            )
            .await?;
        Ok(job_from_row(&row))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let rows = self
            .client
            .query(
                "SELECT id, title, description, salary, location, recruiter_id FROM jobs",
                &[],
            )
            .await?;
        Ok(rows.iter().map(job_from_row).collect())
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn apply(&self, job_id: i32, student_id: i32) -> Result<i32> {
        let row = self
            .client
            .query_one(
                "INSERT INTO applications (job_id, student_id)
                 VALUES ($1, $2)
                 RETURNING id",
                &[&job_id, &student_id],
            )
            .await?;
        Ok(row.get("id"))
    }

    async fn list_applicants(&self, job_id: i32) -> Result<Vec<Applicant>> {
        let rows = self
            .client
            .query(
                "SELECT users.name, users.email
                 FROM applications
                 JOIN users ON applications.student_id = users.id
                 WHERE applications.job_id = $1",
                &[&job_id],
            )
            .await?;
        Ok(rows
            .iter()
            .map(|row| Applicant {
                name: row.get("name"),
                email: row.get("email"),
            })
            .collect())
    }
}
