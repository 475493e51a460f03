use tracing::{debug, warn};

use crate::domain::repository::{Clock, CodeStore};
use crate::domain::secret::verify_secret;
use crate::domain::types::{VerificationCode, VerifiedCode, normalize_email};
use crate::error::AuthServiceError;

pub struct VerifyResetCodeInput {
    pub email: String,
    pub code: String,
}

/// Read-only check of a candidate code. Does not consume the code, so it may
/// be repeated until the password is actually reset.
pub struct VerifyResetCodeUseCase<S: CodeStore, C: Clock> {
    pub codes: S,
    pub clock: C,
}

impl<S: CodeStore, C: Clock> VerifyResetCodeUseCase<S, C> {
    pub async fn execute(
        &self,
        input: VerifyResetCodeInput,
    ) -> Result<VerifiedCode, AuthServiceError> {
        let email = normalize_email(&input.email)?;
        let record = locate_live_code(&self.codes, &self.clock, &email, &input.code).await?;
        let verified = VerifiedCode {
            code_id: record.id,
            subject_email: record.subject_email,
            expires_at: record.expires_at,
        };
        debug!(code_id = %verified.code_id, "reset code verified");
        Ok(verified)
    }
}

/// Find the authoritative code for `email` and check `candidate` against it.
///
/// An expired record is deleted on sight so it cannot be retried. If that
/// delete fails the caller still gets `CodeExpired`; the sweep removes the row.
pub(crate) async fn locate_live_code<S: CodeStore, C: Clock>(
    codes: &S,
    clock: &C,
    email: &str,
    candidate: &str,
) -> Result<VerificationCode, AuthServiceError> {
    let record = codes
        .find_newest_unconsumed(email)
        .await?
        .ok_or(AuthServiceError::CodeNotFound)?;

    if record.is_expired_at(clock.now()) {
        match codes.delete(record.id).await {
            Ok(()) => debug!(code_id = %record.id, "expired reset code removed"),
            Err(e) => warn!(code_id = %record.id, error = ?e, "expired reset code not removed"),
        }
        return Err(AuthServiceError::CodeExpired);
    }

    if !verify_secret(candidate.trim(), &record.code_hash)? {
        return Err(AuthServiceError::CodeMismatch);
    }

    Ok(record)
}
