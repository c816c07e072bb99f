//! OTP route handlers
//!
//! - `POST /send`: issue a code and deliver it by SMS
//! - `POST /verify`: check a submitted code
//! - `POST /resend`: re-issue a code, subject to the resend cooldown
//! - `GET /{id}/status`, `DELETE /{id}`: administrative record access

pub mod admin;
pub mod resend;
pub mod send;
pub mod verify;
