#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Account, VerificationCode};
use crate::error::AuthServiceError;

/// Port for account lookups and password-hash writes.
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthServiceError>;

    /// Overwrite the password hash. Returns `false` if no account has this email.
    async fn set_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AuthServiceError>;
}

/// Repository for password-reset verification codes.
pub trait CodeStore: Send + Sync {
    /// Delete every unconsumed code for a subject, expired or not. Returns rows removed.
    async fn delete_all_unconsumed(&self, subject_email: &str) -> Result<u64, AuthServiceError>;

    async fn insert(&self, code: &VerificationCode) -> Result<(), AuthServiceError>;

    /// Newest unconsumed code for a subject by `created_at`, including expired ones.
    async fn find_newest_unconsumed(
        &self,
        subject_email: &str,
    ) -> Result<Option<VerificationCode>, AuthServiceError>;

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError>;

    /// Delete every code with `expires_at <= now`. Returns rows removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError>;
}

/// Outbound message delivery (email).
pub trait NotificationSender: Send + Sync {
    /// Any failure must surface as [`AuthServiceError::DeliveryFailed`].
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthServiceError>;
}

/// Wall-clock source, injectable so expiry can be tested to the second.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
