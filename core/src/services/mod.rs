//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod otp;
pub mod verification;

pub use cleanup::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
pub use otp::{NumericCodeGenerator, OtpService, OtpServiceConfig, PhoneValidator};
pub use verification::{
    OtpStatusResult, ResendOtpResult, SendOtpResult, SmsServiceTrait, VerificationService,
    VerifyOtpResult,
};
