// handlers/protected/auth/mod.rs - session management for logged-in users
pub mod session;

pub use session::logout;
