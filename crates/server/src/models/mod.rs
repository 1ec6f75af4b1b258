//! Domain model types.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories convert rows into them.

pub mod notification;
pub mod order;
pub mod product;
pub mod response;
pub mod service;
pub mod session;
pub mod settings;
pub mod user;

pub use notification::Notification;
pub use order::{NewOrderItem, Order, OrderItem, OrderStats};
pub use product::{InventoryStats, Product};
pub use response::ApiEnvelope;
pub use service::ServiceItem;
pub use session::{CurrentUser, Session};
pub use settings::StoreSettings;
pub use user::{TempUser, User, UserProfile};
