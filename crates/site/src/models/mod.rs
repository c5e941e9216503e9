//! Domain models for the ordering site.

pub mod menu;
pub mod order;
pub mod session;

pub use menu::MenuItem;
pub use order::{NewOrder, OrderRecord};
pub use session::CurrentUser;
pub use session::keys as session_keys;
