//! Bearer-token authentication for account-scoped routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use uuid::Uuid;

use cinenight_auth_types::token::validate_access_token;

use crate::error::AuthServiceError;
use crate::state::AppState;

/// Account resolved from a valid `Authorization: Bearer <jwt>` header.
///
/// Rejects with [`AuthServiceError::InvalidToken`] when the header is absent,
/// malformed, expired or signed with another secret.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AuthServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let verdict = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(AuthServiceError::InvalidToken)
            .and_then(|Authorization(bearer)| {
                validate_access_token(bearer.token(), &state.jwt_secret).map_err(|e| {
                    tracing::debug!(error = %e, "bearer token rejected");
                    AuthServiceError::InvalidToken
                })
            })
            .map(|info| Self {
                account_id: info.account_id,
            });

        async move { verdict }
    }
}
