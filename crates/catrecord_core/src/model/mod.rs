//! Domain model for cat records.
//!
//! # Responsibility
//! - Define the canonical `Cat` record used by repository and service layers.
//! - Own the derivation of the display `identificator` token.
//!
//! # Invariants
//! - Every persisted cat carries a store-assigned `CatId`.
//! - `identificator` is recomputed whenever `name` changes.

pub mod cat;
pub mod identificator;
