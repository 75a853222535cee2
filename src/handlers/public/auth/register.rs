// handlers/public/auth/register.rs - GET/POST /register

use axum::{extract::State, response::Response};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::forms::{FormDescriptor, RegistrationForm, REGISTRATION_FORM};
use crate::middleware::{ApiResponse, FormInput};
use crate::services::CredentialService;

use super::start_session;

/// GET /register - describe the registration form
pub async fn register_form() -> ApiResponse<FormDescriptor> {
    ApiResponse::success(REGISTRATION_FORM)
}

/// POST /register - create an account and log it in
///
/// The new session is persistent, as if "remember me" had been ticked.
pub async fn register(
    State(state): State<AppState>,
    FormInput(form): FormInput<RegistrationForm>,
) -> Result<Response, ApiError> {
    if !state.config.security.allow_registration {
        return Err(ApiError::forbidden("Registration is disabled"));
    }

    let registration = form.validated()?;
    let user = CredentialService::new(state.store.as_ref())
        .register(registration)
        .await?;

    start_session(&state, CurrentUser::from(&user), true, ApiResponse::created)
}
