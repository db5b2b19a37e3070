//! Delivery Server - order workflow service layer
//!
//! # Architecture
//!
//! Core subsystems of the food-delivery order lifecycle:
//!
//! - **orders**: state machine and workflow coordinator (create, status
//!   updates, assignment, cancellation)
//! - **pricing**: distance/city-tier based delivery-fee calculation
//! - **notify**: multi-recipient notification fan-out over realtime and
//!   push channels
//! - **cod**: cash-on-delivery balance ledger and settlement
//! - **store**: collaborator traits (persistence, users, addresses) plus
//!   in-memory implementations
//!
//! # Data flow
//!
//! ```text
//! request → OrderWorkflow ─┬─ FeePolicy (on create)
//!                          ├─ OrderStateMachine (on status change)
//!                          └─ NotificationRouter ─► RealtimeChannel
//!                                                └► PushChannel
//! ```

pub mod cod;
pub mod core;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod settings;
pub mod store;
pub mod utils;

// Re-export public types
pub use cod::CodService;
pub use crate::core::{AppError, AppResult, Config};
pub use notify::NotificationRouter;
pub use orders::OrderWorkflow;
pub use pricing::FeePolicy;
pub use settings::SettingsService;

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
