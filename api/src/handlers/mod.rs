pub mod error;

pub use error::{handle_domain_error, invalid_request, json_error_handler, not_found};
