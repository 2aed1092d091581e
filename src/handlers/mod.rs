// handlers/mod.rs - Handler tiers
//
// Public (no auth): registration, token acquisition, health
// Protected (JWT auth): account info, coin transfers, purchases
pub mod health;
pub mod protected;
pub mod public;
