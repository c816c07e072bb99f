//! OTP repository trait defining the interface for record persistence.
//!
//! The lifecycle engine depends only on this contract. "Not found" is
//! reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for store faults.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a new record
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The stored record
    /// * `Err(DomainError)` - Store failure
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the most recently created record for a phone and purpose
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Latest record, whatever its state
    /// * `Ok(None)` - No record exists for the pair
    async fn find_latest(
        &self,
        phone_number: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Find a record by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, DomainError>;

    /// Persist the mutable fields of an existing record and bump `updated_at`
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The record as stored
    /// * `Err(DomainError::OtpNotFound)` - No record with this id
    async fn update(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Delete a record by identifier
    ///
    /// # Returns
    /// * `Ok(true)` - Record was deleted
    /// * `Ok(false)` - Record not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every record whose `expires_at` is in the past
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records removed
    async fn delete_expired(&self) -> Result<u64, DomainError>;

    /// All currently valid records for a phone: expiry in the future,
    /// unverified, attempts below the bound
    async fn find_active_by_phone(&self, phone_number: &str)
        -> Result<Vec<OtpRecord>, DomainError>;

    /// Count records created for a phone within the trailing `minutes`
    async fn count_recent(&self, phone_number: &str, minutes: i64) -> Result<u64, DomainError>;

    /// Force `attempts = max_attempts` on every valid record for the pair
    /// in a single batch update
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records invalidated
    async fn invalidate_active(
        &self,
        phone_number: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, DomainError>;
}
