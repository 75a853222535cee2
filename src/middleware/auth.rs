use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cookie::{Cookie, SameSite};

use crate::app::AppState;
use crate::auth::{validate_jwt, CurrentUser, Identity};
use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::services::ServiceError;

/// Resolve the session token of every request into an [`Identity`].
///
/// A missing, invalid or expired token, or a token for a user that no longer
/// exists, leaves the request anonymous. Only an unreachable database fails
/// the request.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = match session_token(request.headers(), &state.config.security.session_cookie) {
        Some(token) => identity_for_token(&state, &token).await?,
        None => Identity::Anonymous,
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn identity_for_token(state: &AppState, token: &str) -> Result<Identity, ApiError> {
    let claims = match validate_jwt(token, &state.config.security.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Ignoring session token: {}", e);
            return Ok(Identity::Anonymous);
        }
    };

    match state.store.find_user(claims.sub).await {
        Ok(Some(user)) => Ok(Identity::User(CurrentUser::from(&user))),
        Ok(None) => {
            tracing::debug!("Session token for unknown user {}", claims.sub);
            Ok(Identity::Anonymous)
        }
        Err(e) if e.is_unavailable() => Err(e.into()),
        Err(e) => {
            tracing::error!("Failed to load session user {}: {}", claims.sub, e);
            Ok(Identity::Anonymous)
        }
    }
}

/// Gate for login-required routes; exposes the user as `Extension<CurrentUser>`
pub async fn require_login(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<Identity>()
        .and_then(Identity::current_user)
        .cloned()
        .ok_or_else(|| ApiError::from(ServiceError::Unauthenticated))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Session token from the session cookie, falling back to a Bearer header
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|c| c.name() == cookie_name && !c.value().is_empty())
        .map(|c| c.value().to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// `Set-Cookie` value carrying a new session token.
///
/// `persistent` sessions survive a browser restart for the token lifetime.
pub fn session_cookie(security: &SecurityConfig, token: String, persistent: bool) -> String {
    let mut builder = Cookie::build((security.session_cookie.clone(), token))
        .path("/")
        .http_only(true)
        .secure(security.secure_cookies)
        .same_site(SameSite::Lax);

    if persistent {
        builder = builder.max_age(cookie::time::Duration::hours(security.jwt_expiry_hours as i64));
    }

    builder.build().to_string()
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie(security: &SecurityConfig) -> String {
    Cookie::build((security.session_cookie.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(security.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build()
        .to_string()
}

/// Response that also sets (or clears) the session cookie
pub fn with_cookie(cookie: String, response: impl IntoResponse) -> Response {
    ([(header::SET_COOKIE, cookie)], response).into_response()
}
