//! Doctor directory loading.

use std::sync::Arc;

use dentago_core::directory::Normalizer;
use dentago_core::models::Doctor;
use tracing::{info, warn};

use crate::api::DentagoApi;
use crate::envelope;
use crate::error::{ClientError, ClientResult};

/// Outcome of a directory load. Failures are non-fatal: the list is empty
/// and `error` carries the message to show next to a retry action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryLoad {
    pub doctors: Vec<Doctor>,
    pub error: Option<String>,
}

/// Fetches and normalizes doctor records.
#[derive(Clone)]
pub struct DoctorDirectory {
    api: Arc<dyn DentagoApi>,
    normalizer: Arc<Normalizer>,
    page_size: u32,
    sort: String,
}

impl DoctorDirectory {
    pub fn new(api: Arc<dyn DentagoApi>, page_size: u32, sort: impl Into<String>) -> Self {
        Self {
            api,
            normalizer: Arc::new(Normalizer::new()),
            page_size,
            sort: sort.into(),
        }
    }

    /// Replace the normalizer (e.g. with extra name markers).
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Load the first page (effectively the whole directory).
    pub async fn fetch_doctors(&self) -> DirectoryLoad {
        match self.try_fetch_doctors().await {
            Ok(doctors) => {
                info!(count = doctors.len(), "Doctor directory loaded");
                DirectoryLoad {
                    doctors,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Doctor directory load failed");
                DirectoryLoad {
                    doctors: Vec::new(),
                    error: Some(e.user_message()),
                }
            }
        }
    }

    async fn try_fetch_doctors(&self) -> ClientResult<Vec<Doctor>> {
        let body = self.api.list_doctors(1, self.page_size, &self.sort).await?;
        let records = envelope::doctor_listing(&body)?;
        Ok(records
            .iter()
            .map(|r| self.normalizer.normalize_doctor(r))
            .collect())
    }

    /// Load one doctor for the profile screen.
    pub async fn fetch_doctor(&self, doctor_id: &str) -> ClientResult<Doctor> {
        let body = self.api.get_doctor(doctor_id).await?;
        let record = envelope::doctor_detail(&body)?
            .ok_or_else(|| ClientError::NotFound(doctor_id.to_string()))?;
        Ok(self.normalizer.normalize_doctor(record))
    }
}
