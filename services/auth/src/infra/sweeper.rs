use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::infra::clock::SystemClock;
use crate::infra::db::DbCodeStore;
use crate::usecase::sweep::SweepExpiredCodesUseCase;

/// Periodically delete expired reset codes. Runs until the runtime shuts down.
pub fn spawn_code_sweeper(codes: DbCodeStore, every: Duration) -> JoinHandle<()> {
    let usecase = SweepExpiredCodesUseCase {
        codes,
        clock: SystemClock,
    };
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = usecase.execute().await {
                warn!(error = ?e, "reset code sweep failed");
            }
        }
    })
}
