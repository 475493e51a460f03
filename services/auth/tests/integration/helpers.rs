#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use cinenight_auth::domain::repository::{Clock, CodeStore, NotificationSender, UserDirectory};
use cinenight_auth::domain::secret::hash_secret;
use cinenight_auth::domain::types::{Account, VerificationCode};
use cinenight_auth::error::AuthServiceError;
use cinenight_auth::usecase::reset_code::{IssueResetCodeInput, IssueResetCodeUseCase};

// ── MockUserDirectory ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserDirectory {
    pub accounts: Arc<Mutex<Vec<Account>>>,
    pub fail_updates: bool,
}

impl MockUserDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            fail_updates: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Every `set_password_hash` call fails with `PersistenceFailed`.
    pub fn failing_updates(accounts: Vec<Account>) -> Self {
        Self {
            fail_updates: true,
            ..Self::new(accounts)
        }
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.password_hash.clone())
    }
}

impl UserDirectory for MockUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn set_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AuthServiceError> {
        if self.fail_updates {
            return Err(AuthServiceError::PersistenceFailed(anyhow!(
                "directory unavailable"
            )));
        }
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.email == email) {
            Some(account) => {
                account.password_hash = password_hash.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockCodeStore ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCodeStore {
    pub codes: Arc<Mutex<Vec<VerificationCode>>>,
    pub fail_writes: bool,
    pub fail_deletes: bool,
}

impl MockCodeStore {
    pub fn new(codes: Vec<VerificationCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared handle to the stored records for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<VerificationCode>>> {
        Arc::clone(&self.codes)
    }

    fn unavailable() -> AuthServiceError {
        AuthServiceError::PersistenceFailed(anyhow!("code store unavailable"))
    }
}

impl CodeStore for MockCodeStore {
    async fn delete_all_unconsumed(&self, subject_email: &str) -> Result<u64, AuthServiceError> {
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.subject_email != subject_email || c.consumed);
        Ok((before - codes.len()) as u64)
    }

    async fn insert(&self, code: &VerificationCode) -> Result<(), AuthServiceError> {
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_newest_unconsumed(
        &self,
        subject_email: &str,
    ) -> Result<Option<VerificationCode>, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.subject_email == subject_email && !c.consumed)
            .max_by_key(|c| (c.created_at, c.id))
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        if self.fail_deletes {
            return Err(Self::unavailable());
        }
        self.codes.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError> {
        if self.fail_deletes {
            return Err(Self::unavailable());
        }
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.expires_at > now);
        Ok((before - codes.len()) as u64)
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentMessage>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentMessage>>> {
        Arc::clone(&self.sent)
    }
}

impl NotificationSender for MockNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthServiceError> {
        if self.fail {
            return Err(AuthServiceError::DeliveryFailed(anyhow!("relay down")));
        }
        self.sent.lock().unwrap().push(SentMessage {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}

// ── MockClock ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockClock {
    pub now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const TEST_EMAIL: &str = "a@x.com";
pub const TEST_PASSWORD: &str = "popcorn1";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap()
}

pub fn test_account() -> Account {
    Account {
        id: Uuid::new_v4(),
        name: "Ada".to_owned(),
        email: TEST_EMAIL.to_owned(),
        password_hash: hash_secret(TEST_PASSWORD).unwrap(),
    }
}

/// Unconsumed code for `TEST_EMAIL` created at `created_at`, valid for ten minutes.
pub fn stored_code(plain: &str, created_at: DateTime<Utc>) -> VerificationCode {
    VerificationCode {
        id: Uuid::now_v7(),
        subject_email: TEST_EMAIL.to_owned(),
        code_hash: hash_secret(plain).unwrap(),
        expires_at: created_at + Duration::minutes(10),
        consumed: false,
        created_at,
    }
}

/// Pull the six-digit code out of a delivered message body.
pub fn code_from_body(body: &str) -> String {
    body.split(|c: char| !c.is_ascii_digit())
        .find(|chunk| chunk.len() == 6)
        .unwrap()
        .to_owned()
}

/// Issue a code for `TEST_EMAIL` through the real use case and return the
/// plaintext that was mailed.
pub async fn issue_code(
    users: &MockUserDirectory,
    codes: &MockCodeStore,
    clock: &MockClock,
    notifier: &MockNotifier,
) -> String {
    let uc = IssueResetCodeUseCase {
        users: users.clone(),
        codes: codes.clone(),
        notifier: notifier.clone(),
        clock: clock.clone(),
        code_ttl: Duration::minutes(10),
    };
    uc.execute(IssueResetCodeInput {
        email: TEST_EMAIL.to_owned(),
    })
    .await
    .unwrap();
    let sent = notifier.sent.lock().unwrap();
    code_from_body(&sent.last().unwrap().body)
}
