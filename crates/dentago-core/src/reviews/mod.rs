//! Review prompts for completed visits.
//!
//! A doctor is prompted at most once per device: both rating and skipping
//! mark the doctor as reviewed, and the mark is persisted.

mod queue;

pub use queue::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{load_json, save_json, KeyValueStore, StorageKey, StoreResult};

/// Review errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error("Baho 1 dan 5 gacha bo'lishi kerak (berildi: {0})")]
    InvalidRating(u8),
}

/// Body of a review submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    /// Star rating, 1..=5
    pub rating: u8,
    pub comment: String,
}

impl ReviewSubmission {
    pub fn new(rating: u8, comment: &str) -> Result<Self, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }
        Ok(Self {
            rating,
            comment: comment.trim().to_string(),
        })
    }
}

/// Doctor IDs already prompted for review, persisted under `reviewedDoctors`.
pub struct ReviewedDoctorSet {
    store: Arc<dyn KeyValueStore>,
    ids: Vec<String>,
}

impl ReviewedDoctorSet {
    /// Load the set. A corrupt entry is treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ids = match load_json::<Vec<String>>(store.as_ref(), StorageKey::ReviewedDoctors) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Reviewed doctor set unreadable, starting empty");
                Vec::new()
            }
        };
        Self { store, ids }
    }

    pub fn contains(&self, doctor_id: &str) -> bool {
        self.ids.iter().any(|id| id == doctor_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Mark a doctor as reviewed and persist. Returns `false` if already marked.
    /// The in-memory set only changes once the write succeeded.
    pub fn mark_reviewed(&mut self, doctor_id: &str) -> StoreResult<bool> {
        if self.contains(doctor_id) {
            return Ok(false);
        }
        let mut ids = self.ids.clone();
        ids.push(doctor_id.to_string());
        save_json(self.store.as_ref(), StorageKey::ReviewedDoctors, &ids)?;
        self.ids = ids;
        debug!(doctor = %doctor_id, "Doctor marked as reviewed");
        Ok(true)
    }

    /// Forget every mark.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.store.remove(StorageKey::ReviewedDoctors)?;
        self.ids.clear();
        Ok(())
    }
}
