use chrono::Duration;

use cinenight_auth::error::AuthServiceError;
use cinenight_auth::usecase::sweep::SweepExpiredCodesUseCase;

use crate::helpers::{MockClock, MockCodeStore, stored_code, t0};

#[tokio::test]
async fn should_remove_only_expired_codes() {
    let stale = stored_code("111111", t0() - Duration::minutes(30));
    let at_boundary = stored_code("222222", t0() - Duration::minutes(10));
    let live = stored_code("333333", t0() - Duration::minutes(1));
    let live_id = live.id;
    let codes = MockCodeStore::new(vec![stale, at_boundary, live]);
    let uc = SweepExpiredCodesUseCase {
        codes: codes.clone(),
        clock: MockClock::at(t0()),
    };

    let removed = uc.execute().await.unwrap();

    assert_eq!(removed, 2);
    let remaining = codes.codes.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, live_id);
}

#[tokio::test]
async fn should_report_zero_when_nothing_expired() {
    let uc = SweepExpiredCodesUseCase {
        codes: MockCodeStore::new(vec![stored_code("482913", t0())]),
        clock: MockClock::at(t0()),
    };

    assert_eq!(uc.execute().await.unwrap(), 0);
}

#[tokio::test]
async fn should_surface_store_failure() {
    let uc = SweepExpiredCodesUseCase {
        codes: MockCodeStore {
            fail_deletes: true,
            ..MockCodeStore::empty()
        },
        clock: MockClock::at(t0()),
    };

    let result = uc.execute().await;

    assert!(matches!(result, Err(AuthServiceError::PersistenceFailed(_))));
}
