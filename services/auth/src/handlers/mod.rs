use axum::extract::FromRequest;

use crate::error::AuthServiceError;

pub mod identity;
pub mod password;
pub mod reset;

/// `Json` extractor whose rejections render as [`AuthServiceError::InvalidRequest`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthServiceError))]
pub struct JsonBody<T>(pub T);
