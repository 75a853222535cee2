use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Form` whose rejections (wrong content type, undecodable body) use the
/// JSON error envelope instead of axum's plain-text response.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(FormInput(value))
    }
}
