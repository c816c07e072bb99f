//! CORS middleware configuration for cross-origin requests.
//!
//! The OTP endpoints are called from browser and mobile clients on origins
//! the service does not know in advance, so any origin is accepted. Only the
//! methods and headers the API actually uses are allowed.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Max age for the preflight cache, in seconds
const PREFLIGHT_MAX_AGE: usize = 3600;

/// Creates the CORS middleware used by every route
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .max_age(PREFLIGHT_MAX_AGE)
}
