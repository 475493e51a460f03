use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::handlers::JsonBody;
use crate::handlers::identity::AuthenticatedAccount;
use crate::state::AppState;
use crate::usecase::change_password::{ChangePasswordInput, ChangePasswordUseCase};

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `PUT /auth/password`: change the caller's password given the current one.
pub async fn change_password(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_directory(),
    };
    usecase
        .execute(ChangePasswordInput {
            account_id: account.account_id,
            current_password: body.current_password,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
