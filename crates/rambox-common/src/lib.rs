pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, PlatformError, RamboxError, ServiceError};
pub use events::{Event, EventBus};
pub use types::{AppState, Rect, ServiceId};

pub type Result<T> = std::result::Result<T, RamboxError>;
