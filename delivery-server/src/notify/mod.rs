//! Notification fan-out
//!
//! One order event becomes one envelope per recipient, dispatched over two
//! independent channels (realtime groups + mobile push). Dispatch is best
//! effort: a failing target is logged and skipped, never blocking the
//! other targets or the triggering operation.
//!
//! ```text
//! status change ─► NotificationRouter ─┬─ customer   (realtime + push)
//!                                      ├─ restaurant (realtime + push)
//!                                      ├─ courier    (realtime + push, if assigned)
//!                                      └─ admin      (realtime broadcast only)
//! ```

pub mod channels;
pub mod messages;
pub mod router;

pub use channels::{ChannelError, InProcessRealtimeChannel, PushChannel, RealtimeChannel};
pub use router::NotificationRouter;
