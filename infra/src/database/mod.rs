//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Embedded schema migrations
//! - MySQL `OtpRepository` implementation

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlOtpRepository;
