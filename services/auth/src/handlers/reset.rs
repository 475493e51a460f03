use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinenight_core::serde::to_rfc3339_ms;

use crate::error::AuthServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::reset_code::{IssueResetCodeInput, IssueResetCodeUseCase};
use crate::usecase::reset_password::{ResetPasswordInput, ResetPasswordUseCase};
use crate::usecase::verify_code::{VerifyResetCodeInput, VerifyResetCodeUseCase};

// ── POST /auth/reset-code ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueResetCodeRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct IssueResetCodeResponse {
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn issue_reset_code(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<IssueResetCodeRequest>,
) -> Result<(StatusCode, Json<IssueResetCodeResponse>), AuthServiceError> {
    let usecase = IssueResetCodeUseCase {
        users: state.user_directory(),
        codes: state.code_store(),
        notifier: state.mailer.clone(),
        clock: state.clock(),
        code_ttl: state.reset_code_ttl,
    };
    let issued = usecase
        .execute(IssueResetCodeInput { email: body.email })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(IssueResetCodeResponse {
            expires_at: issued.expires_at,
        }),
    ))
}

// ── POST /auth/reset-code/verify ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyResetCodeResponse {
    pub email: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn verify_reset_code(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyResetCodeRequest>,
) -> Result<Json<VerifyResetCodeResponse>, AuthServiceError> {
    let usecase = VerifyResetCodeUseCase {
        codes: state.code_store(),
        clock: state.clock(),
    };
    let verified = usecase
        .execute(VerifyResetCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(VerifyResetCodeResponse {
        email: verified.subject_email,
        expires_at: verified.expires_at,
    }))
}

// ── POST /auth/password/reset ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ResetPasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_directory(),
        codes: state.code_store(),
        clock: state.clock(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
