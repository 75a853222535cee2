// handlers/public/auth/login.rs - GET/POST /login

use axum::{extract::State, response::Response};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::forms::{FormDescriptor, LoginForm, LOGIN_FORM};
use crate::middleware::{ApiResponse, FormInput};
use crate::services::CredentialService;

use super::start_session;

/// GET /login - describe the login form
pub async fn login_form() -> ApiResponse<FormDescriptor> {
    ApiResponse::success(LOGIN_FORM)
}

/// POST /login - verify credentials and start a session
///
/// Unknown email and wrong password produce the same response.
/// `remember_me` makes the session cookie outlive the browser session.
pub async fn login(
    State(state): State<AppState>,
    FormInput(form): FormInput<LoginForm>,
) -> Result<Response, ApiError> {
    let input = form.validated()?;

    let user = CredentialService::new(state.store.as_ref())
        .verify(&input.email, &input.password)
        .await?;

    let Some(user) = user else {
        tracing::warn!("Failed login attempt");
        return Err(ApiError::unauthorized("Wrong login or password"));
    };

    tracing::info!("User {} logged in", user.id);
    start_session(
        &state,
        CurrentUser::from(&user),
        input.remember_me,
        ApiResponse::success,
    )
}
