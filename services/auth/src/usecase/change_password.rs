use tracing::info;
use uuid::Uuid;

use crate::domain::repository::UserDirectory;
use crate::domain::secret::{hash_secret, verify_secret};
use crate::domain::types::check_password_policy;
use crate::error::AuthServiceError;

pub struct ChangePasswordInput {
    pub account_id: Uuid,
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserDirectory> {
    pub users: U,
}

impl<U: UserDirectory> ChangePasswordUseCase<U> {
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), AuthServiceError> {
        check_password_policy(&input.new_password)?;

        let account = self
            .users
            .find_by_id(input.account_id)
            .await?
            .ok_or(AuthServiceError::AccountNotFound)?;

        if !verify_secret(&input.current_password, &account.password_hash)? {
            return Err(AuthServiceError::InvalidCredential);
        }

        let password_hash = hash_secret(&input.new_password)?;
        if !self
            .users
            .set_password_hash(&account.email, &password_hash)
            .await?
        {
            return Err(AuthServiceError::AccountNotFound);
        }

        info!(account_id = %account.id, "password changed");
        Ok(())
    }
}
