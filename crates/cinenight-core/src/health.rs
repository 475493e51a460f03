use axum::http::StatusCode;

/// Handler for `GET /healthz`. The process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. Services with hard dependencies may swap in their own.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
