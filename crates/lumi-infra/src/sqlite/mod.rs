//! SQLite persistence layer.

pub mod account;
pub mod history;
pub mod pool;

pub use account::SqliteAccountStore;
pub use history::SqliteHistoryStore;
pub use pool::DatabasePool;
