//! Order lifecycle module
//!
//! - **state_machine**: legal status transitions and the guarded
//!   assignment/completion operations
//! - **workflow**: the coordinator tying fee calculation, the state
//!   machine and notification fan-out together
//! - **money**: decimal helpers for monetary arithmetic
//!
//! # Status flow
//!
//! ```text
//! update_status(order, to)
//!     ├─ 1. Load order
//!     ├─ 2. Validate transition (state machine)
//!     ├─ 3. Persist
//!     └─ 4. Fan out notifications (best effort, never fails the update)
//! ```

pub mod money;
pub mod state_machine;
pub mod workflow;

pub use state_machine::{apply_transition, can_transition};
pub use workflow::OrderWorkflow;
