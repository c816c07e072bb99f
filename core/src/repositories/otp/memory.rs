//! Process-local implementation of OtpRepository
//!
//! Backs local development and the test suites. Records live in insertion
//! order, so among records sharing a `created_at` the last inserted wins
//! `find_latest`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::OtpPurpose;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// In-memory OTP repository
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<Vec<OtpRecord>>>,
    unavailable: AtomicBool,
}

impl InMemoryOtpRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate a store outage; every call fails while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of records held, whatever their state
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every record for a phone, oldest first
    pub async fn records_for(&self, phone_number: &str) -> Vec<OtpRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.phone_number == phone_number)
            .cloned()
            .collect()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_latest(
        &self,
        phone_number: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.phone_number == phone_number && r.purpose == purpose)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, mut record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(DomainError::OtpNotFound)?;

        record.updated_at = Utc::now();
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        self.check_available()?;
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.expires_at >= now);
        Ok((before - records.len()) as u64)
    }

    async fn find_active_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.phone_number == phone_number && r.is_valid())
            .cloned()
            .collect())
    }

    async fn count_recent(&self, phone_number: &str, minutes: i64) -> Result<u64, DomainError> {
        self.check_available()?;
        let since = Utc::now() - Duration::minutes(minutes);
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.phone_number == phone_number && r.created_at >= since)
            .count() as u64)
    }

    async fn invalidate_active(
        &self,
        phone_number: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let mut invalidated = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.phone_number == phone_number && r.purpose == purpose && r.is_valid())
        {
            record.invalidate();
            invalidated += 1;
        }
        Ok(invalidated)
    }
}
