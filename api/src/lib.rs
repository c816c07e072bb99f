//! HTTP surface of the SMS OTP service
//!
//! Exposed as a library so the binary and the integration tests build the
//! same `App`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::{AppState, StoreProbe};
