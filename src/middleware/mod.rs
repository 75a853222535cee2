pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{require_login, resolve_identity};
pub use extract::FormInput;
pub use response::{ApiResponse, ApiResult};
