//! Service registry and the logic around it.
//!
//! - `model`: the persisted `Service` record and its edit types
//! - `store` / `registry`: JSON persistence and ordered CRUD
//! - `catalog`: remote service templates for the add-service picker
//! - `layout`: tab strip materialization (left tabs, spacer, right tabs)
//! - `unread` / `notifier`: unread aggregation and notification wording

pub mod catalog;
pub mod layout;
pub mod model;
pub mod notifier;
pub mod registry;
pub mod store;
pub mod unread;

pub use catalog::{CatalogLoader, ServiceCatalog, ServiceCatalogEntry};
pub use layout::{TabSlot, TabSpec, TabStrip};
pub use model::{Align, NewService, Service, ServiceKind, ServicePatch, ZoomAction};
pub use notifier::{manual_notification, notification_body, notification_for, NotificationContext};
pub use registry::ServiceRegistry;
pub use store::{ServiceStore, StoredServices};
pub use unread::{parse_title_unread, UnreadChange, UnreadCount, UnreadCounter};
