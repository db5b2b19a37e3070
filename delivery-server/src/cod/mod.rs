//! Cash-on-delivery settlement
//!
//! Driver cash balances, carry-limit preferences and the two-leg payment
//! settlement. All balance mutations for one driver are serialized behind a
//! per-driver lock so concurrent settlements cannot race past the carry
//! limit.

pub mod service;

pub use service::CodService;
