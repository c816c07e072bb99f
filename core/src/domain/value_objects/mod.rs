//! Value objects representing immutable domain concepts.

pub mod purpose;

pub use purpose::OtpPurpose;
