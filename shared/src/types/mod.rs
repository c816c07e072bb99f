//! Response types shared between the HTTP surface and its tests

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth};
