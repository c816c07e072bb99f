//! One-time passcode record, the sole persistent entity.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::OtpPurpose;
use crate::errors::{DomainError, DomainResult};

/// Default number of verification attempts per record
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Lifecycle state derived from a record's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpStatus {
    Active,
    Verified,
    Expired,
    AttemptsExhausted,
}

/// OTP record bound to a phone number and a purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Canonical phone number (E.164-like, e.g. +994501234567)
    pub phone_number: String,

    /// Fixed-length numeric code
    pub code: String,

    /// What the code was issued for
    pub purpose: OtpPurpose,

    /// Whether the code has been successfully verified
    pub verified: bool,

    /// Verification attempts consumed so far
    pub attempts: i32,

    /// Attempt bound; `attempts` reaches it exactly when exhausted
    pub max_attempts: i32,

    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Set once, when verification succeeds
    pub verified_at: Option<DateTime<Utc>>,
}

impl OtpRecord {
    /// Creates a fresh, active record expiring `validity` from now
    pub fn new(
        phone_number: String,
        code: String,
        purpose: OtpPurpose,
        validity: Duration,
        max_attempts: i32,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            phone_number,
            code,
            purpose,
            verified: false,
            attempts: 0,
            max_attempts,
            expires_at: now + validity,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// `true` once `now` is past `expires_at`
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn can_attempt(&self) -> bool {
        self.attempts < self.max_attempts
    }

    /// A record is valid iff not expired, not verified and attempts remain
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.verified && self.can_attempt()
    }

    /// Derived lifecycle state, terminal states taking precedence in the
    /// same order verification checks them
    pub fn status(&self) -> OtpStatus {
        if self.verified {
            OtpStatus::Verified
        } else if self.is_expired() {
            OtpStatus::Expired
        } else if !self.can_attempt() {
            OtpStatus::AttemptsExhausted
        } else {
            OtpStatus::Active
        }
    }

    /// Checks `input_code` against this record
    ///
    /// State checks run first and never consume an attempt. Past them the
    /// attempt is consumed whether or not the code matches, so the caller
    /// must persist the record on every outcome.
    pub fn verify(&mut self, input_code: &str) -> DomainResult<()> {
        if self.verified {
            return Err(DomainError::OtpAlreadyUsed);
        }
        if self.is_expired() {
            return Err(DomainError::OtpExpired);
        }
        if !self.can_attempt() {
            return Err(DomainError::MaxAttemptsReached);
        }

        let now = Utc::now();
        self.attempts += 1;
        self.updated_at = now;

        if !constant_time_eq(self.code.as_bytes(), input_code.as_bytes()) {
            return Err(DomainError::InvalidOtpCode);
        }

        self.verified = true;
        self.verified_at = Some(now);
        Ok(())
    }

    /// Forces the record into the exhausted state without deleting it
    pub fn invalidate(&mut self) {
        self.attempts = self.max_attempts;
        self.updated_at = Utc::now();
    }

    /// Remaining attempts (0 if exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }

    /// Time until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
