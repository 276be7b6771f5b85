pub mod retention;
pub mod store;

pub use retention::{evict_overflow, BackupReclaimer, EvictionSink, KeepBackups};
pub use store::HistoryStore;
