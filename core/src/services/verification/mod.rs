//! Request orchestration for the OTP workflow
//!
//! Canonicalises input, drives the lifecycle engine, dispatches the SMS and
//! turns verification failures into user-facing results.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::VerificationService;
pub use traits::SmsServiceTrait;
pub use types::{
    failure_message, sms_message, OtpStatusResult, ResendOtpResult, SendOtpResult,
    VerifyOtpResult,
};
