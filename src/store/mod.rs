use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::appointments::repo::AppointmentRepo;
use crate::config::AppConfig;
use crate::employees::repo::EmployeeRepo;
use crate::salon_services::repo::ServiceRepo;
use crate::users::repo::UserRepo;

#[cfg(test)]
pub mod memory;

pub const USER_EMAIL_CONSTRAINT: &str = "users_email_key";
pub const APPOINTMENT_SLOT_CONSTRAINT: &str = "appointments_employee_slot_key";

/// Failures reported by a storage backend, with constraint violations split out.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Unique(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKey(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or_default().to_string();
            if db.is_unique_violation() {
                return StoreError::Unique(constraint);
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKey(constraint);
            }
        }
        StoreError::Database(e)
    }
}

/// Every collection the API persists. Handlers and the scheduler only see this trait.
pub trait Store: UserRepo + EmployeeRepo + ServiceRepo + AppointmentRepo + Send + Sync {}

impl<T> Store for T where T: UserRepo + EmployeeRepo + ServiceRepo + AppointmentRepo + Send + Sync {}

/// PostgreSQL-backed store. Uniqueness and references are enforced by table constraints.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::new(db))
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}
