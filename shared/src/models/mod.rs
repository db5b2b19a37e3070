//! Data models shared across crates

pub mod address;
pub mod menu;
pub mod restaurant;
pub mod role;
pub mod user;

pub use address::{Address, Coordinates};
pub use menu::MenuItem;
pub use restaurant::Restaurant;
pub use role::UserRole;
pub use user::UserProfile;
