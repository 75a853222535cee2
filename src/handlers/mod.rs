// handlers/mod.rs - two security tiers
//
// Public (anonymous allowed) → Protected (session required)
pub mod protected; // Routes behind `require_login`
pub mod public; // Listings, login and registration
