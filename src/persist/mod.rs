//! Persistence module
//!
//! Durable storage of the accumulated flight time and the scheduler that
//! throttles how often it is written.

pub mod scheduler;
pub mod store;

// Re-export main types
pub use scheduler::{load_saved, PersistScheduler, PERSIST_THROTTLE};
pub use store::{FileStore, MemoryStore, TimeStore};

/// Key under which the elapsed flight time is persisted, as a base-10
/// millisecond string
pub const ELAPSED_KEY: &str = "geofsFlightTimerCurrent";
