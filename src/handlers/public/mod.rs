// handlers/public/mod.rs - handlers that accept anonymous requests
//
// The identity middleware still runs, so listings can show who is logged in.
pub mod auth;
pub mod listing;
