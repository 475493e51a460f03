use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::repository::{Clock, CodeStore, NotificationSender, UserDirectory};
use crate::domain::secret::{generate_code, hash_secret};
use crate::domain::types::{
    RESET_CODE_SUBJECT, VerificationCode, normalize_email, reset_code_body,
};
use crate::error::AuthServiceError;

pub struct IssueResetCodeInput {
    pub email: String,
}

#[derive(Debug)]
pub struct IssueResetCodeOutput {
    pub code_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

pub struct IssueResetCodeUseCase<U, S, N, C>
where
    U: UserDirectory,
    S: CodeStore,
    N: NotificationSender,
    C: Clock,
{
    pub users: U,
    pub codes: S,
    pub notifier: N,
    pub clock: C,
    pub code_ttl: Duration,
}

impl<U, S, N, C> IssueResetCodeUseCase<U, S, N, C>
where
    U: UserDirectory,
    S: CodeStore,
    N: NotificationSender,
    C: Clock,
{
    pub async fn execute(
        &self,
        input: IssueResetCodeInput,
    ) -> Result<IssueResetCodeOutput, AuthServiceError> {
        let email = normalize_email(&input.email)?;

        let account = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::AccountNotFound)?;

        let code = generate_code();
        let now = self.clock.now();
        let record = VerificationCode {
            id: Uuid::now_v7(),
            subject_email: email.clone(),
            code_hash: hash_secret(&code)?,
            expires_at: now + self.code_ttl,
            consumed: false,
            created_at: now,
        };

        // Persist before sending: a delivered code must always be redeemable.
        let superseded = self.codes.delete_all_unconsumed(&email).await?;
        self.codes.insert(&record).await?;
        info!(
            code_id = %record.id,
            account_id = %account.id,
            superseded,
            "reset code issued"
        );

        let body = reset_code_body(&account.name, &code, self.code_ttl.num_minutes());
        if let Err(e) = self.notifier.send(&email, RESET_CODE_SUBJECT, &body).await {
            warn!(code_id = %record.id, "reset code stored but not delivered");
            return Err(e);
        }

        Ok(IssueResetCodeOutput {
            code_id: record.id,
            expires_at: record.expires_at,
        })
    }
}
