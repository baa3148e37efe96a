//! Session endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::Ack;
use crate::auth::{clear_cookie, session_cookie};
use crate::errors::AppError;
use crate::models::is_email;
use crate::AppState;

/// Request body for `POST /jwt`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// POST /jwt - Issue a session cookie for the caller.
pub async fn issue_token(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(login) = payload?;
    let email = login.email.trim();

    if !is_email(email) {
        return Err(AppError::Validation(
            "email must be a valid email address".to_string(),
        ));
    }

    let token = state.keys.issue(email)?;
    let cookie = session_cookie(&token, state.keys.ttl_secs(), state.config.production);

    tracing::info!(email, "Issued session token");

    Ok(([(header::SET_COOKIE, cookie)], Json(Ack { success: true })))
}

/// POST /logout - Expire the session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie(state.config.production))],
        Json(Ack { success: true }),
    )
}
