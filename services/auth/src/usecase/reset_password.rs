use tracing::{error, info};

use crate::domain::repository::{Clock, CodeStore, UserDirectory};
use crate::domain::secret::hash_secret;
use crate::domain::types::{check_password_policy, normalize_email};
use crate::error::AuthServiceError;
use crate::usecase::verify_code::locate_live_code;

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, S, C>
where
    U: UserDirectory,
    S: CodeStore,
    C: Clock,
{
    pub users: U,
    pub codes: S,
    pub clock: C,
}

impl<U, S, C> ResetPasswordUseCase<U, S, C>
where
    U: UserDirectory,
    S: CodeStore,
    C: Clock,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        // Policy before any store access: a rejected password mutates nothing.
        check_password_policy(&input.new_password)?;
        let email = normalize_email(&input.email)?;

        // Independent of any earlier verify.
        let record = locate_live_code(&self.codes, &self.clock, &email, &input.code).await?;

        let password_hash = hash_secret(&input.new_password)?;
        // Any failure from here to the delete leaves the code in place.
        if !self.users.set_password_hash(&email, &password_hash).await? {
            return Err(AuthServiceError::AccountNotFound);
        }

        if let Err(e) = self.codes.delete(record.id).await {
            error!(code_id = %record.id, "password reset but code not removed");
            return Err(e);
        }

        info!(code_id = %record.id, "password reset with code");
        Ok(())
    }
}
