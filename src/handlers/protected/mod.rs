// handlers/protected/mod.rs - handlers behind `require_login`
//
// Every handler here receives the caller as `Extension<CurrentUser>`.
pub mod auth;
pub mod records;
