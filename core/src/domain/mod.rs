//! Domain layer containing the OTP record and its value objects.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
