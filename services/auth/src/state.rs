use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::infra::clock::SystemClock;
use crate::infra::db::{DbCodeStore, DbUserDirectory};
use crate::infra::mailer::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: HttpMailer,
    pub jwt_secret: String,
    pub reset_code_ttl: Duration,
}

impl AppState {
    pub fn user_directory(&self) -> DbUserDirectory {
        DbUserDirectory {
            db: self.db.clone(),
        }
    }

    pub fn code_store(&self) -> DbCodeStore {
        DbCodeStore {
            db: self.db.clone(),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock
    }
}
