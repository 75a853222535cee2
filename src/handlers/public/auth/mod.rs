// handlers/public/auth/mod.rs - login and registration
pub mod login;
pub mod register;

pub use login::{login, login_form};
pub use register::{register, register_form};

use serde::Serialize;

use crate::app::AppState;
use crate::auth::{generate_jwt, Claims, CurrentUser};
use crate::error::ApiError;
use crate::middleware::auth::{session_cookie, with_cookie};
use crate::middleware::ApiResponse;

/// Body returned when a session starts
#[derive(Debug, Serialize)]
pub struct SessionStarted {
    pub user: CurrentUser,
    pub token: String,
    pub expires_in: u64,
}

/// Issue a session token for `user` and attach it as the session cookie
pub(crate) fn start_session(
    state: &AppState,
    user: CurrentUser,
    persistent: bool,
    response: impl FnOnce(SessionStarted) -> ApiResponse<SessionStarted>,
) -> Result<axum::response::Response, ApiError> {
    let security = &state.config.security;
    let claims = Claims::new(user.id, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::internal_server_error("Could not start a session")
    })?;

    let cookie = session_cookie(security, token.clone(), persistent);
    let body = SessionStarted {
        user,
        token,
        expires_in: security.jwt_expiry_hours * 3600,
    };
    Ok(with_cookie(cookie, response(body)))
}
