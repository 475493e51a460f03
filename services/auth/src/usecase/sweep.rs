use tracing::debug;

use crate::domain::repository::{Clock, CodeStore};
use crate::error::AuthServiceError;

/// Deletes every code past its expiry.
pub struct SweepExpiredCodesUseCase<S: CodeStore, C: Clock> {
    pub codes: S,
    pub clock: C,
}

impl<S: CodeStore, C: Clock> SweepExpiredCodesUseCase<S, C> {
    pub async fn execute(&self) -> Result<u64, AuthServiceError> {
        let removed = self.codes.delete_expired(self.clock.now()).await?;
        if removed > 0 {
            debug!(removed, "expired reset codes swept");
        }
        Ok(removed)
    }
}
