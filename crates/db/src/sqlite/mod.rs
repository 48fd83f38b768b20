//! SQLite-Backend-Implementierungen fuer die Repository-Traits

pub mod admins;
pub mod pool;
pub mod sessions;

pub use pool::SqliteDb;
