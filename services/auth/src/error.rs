use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("account not found")]
    AccountNotFound,
    #[error("verification code not found")]
    CodeNotFound,
    #[error("verification code expired")]
    CodeExpired,
    #[error("verification code does not match")]
    CodeMismatch,
    #[error("password must be at least {min_len} characters")]
    WeakCredential { min_len: usize },
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("invalid token")]
    InvalidToken,
    /// Body could not be read as the expected JSON. Keeps axum's status (400, 415 or 422).
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
    #[error("notification delivery failed")]
    DeliveryFailed(#[source] anyhow::Error),
    #[error("persistence failed")]
    PersistenceFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::WeakCredential { .. } => "WEAK_CREDENTIAL",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::DeliveryFailed(_) => "DELIVERY_FAILED",
            Self::PersistenceFailed(_) => "PERSISTENCE_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AccountNotFound | Self::CodeNotFound => StatusCode::NOT_FOUND,
            Self::CodeExpired => StatusCode::GONE,
            Self::CodeMismatch | Self::InvalidCredential | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::WeakCredential { .. } | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::InvalidRequest { status, .. } => *status,
            Self::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            Self::PersistenceFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AuthServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Statuses are recorded by TraceLayer; only 5xx causes are logged here.
        match &self {
            Self::DeliveryFailed(e) | Self::PersistenceFailed(e) | Self::Internal(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "request failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
