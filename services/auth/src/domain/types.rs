use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AuthServiceError;

/// Account data the recovery flow needs from the user directory.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Single-use password-reset code bound to an email address.
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub id: Uuid,
    pub subject_email: String,
    /// Argon2id PHC string of the numeric code. The plaintext is never kept.
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// A code is dead at `expires_at` itself, not one tick later.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Proof that a candidate code matched the authoritative record for a subject.
///
/// Carries no authority across requests: consumption re-checks the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCode {
    pub code_id: Uuid,
    pub subject_email: String,
    pub expires_at: DateTime<Utc>,
}

/// Number of digits in a reset code.
pub const RESET_CODE_LEN: usize = 6;

/// Reset code time-to-live bounds and default, in seconds.
pub const MIN_RESET_CODE_TTL_SECS: i64 = 5 * 60;
pub const MAX_RESET_CODE_TTL_SECS: i64 = 15 * 60;
pub const DEFAULT_RESET_CODE_TTL_SECS: i64 = 10 * 60;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const RESET_CODE_SUBJECT: &str = "Your Cinenight password reset code";

/// Plain-text reset mail. A blank `name` falls back to a bare greeting.
pub fn reset_code_body(name: &str, code: &str, ttl_minutes: i64) -> String {
    let greeting = match name.trim() {
        "" => "Hi,".to_owned(),
        name => format!("Hi {name},"),
    };
    format!(
        "{greeting}\n\n\
         Your Cinenight password reset code is: {code}\n\n\
         It expires in {ttl_minutes} minutes. If you did not ask to reset your password, \
         you can ignore this email."
    )
}

/// Trim and lowercase an email, rejecting anything not shaped like `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, AuthServiceError> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthServiceError::InvalidEmail);
    };
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty());
    if well_formed {
        Ok(email)
    } else {
        Err(AuthServiceError::InvalidEmail)
    }
}

pub fn check_password_policy(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::WeakCredential {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
