// handlers/protected/auth/session.rs - GET /logout

use axum::{extract::State, response::Response, Extension};
use serde_json::json;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::middleware::auth::{expired_session_cookie, with_cookie};
use crate::middleware::ApiResponse;

/// GET /logout - drop the session cookie
///
/// Tokens are stateless; one copied out of the cookie stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    tracing::info!("User {} logged out", user.id);
    with_cookie(
        expired_session_cookie(&state.config.security),
        ApiResponse::success(json!({ "logged_out": true })),
    )
}
