//! Sequential review prompts after confirmed visits.

use std::sync::Arc;

use dentago_core::models::Appointment;
use dentago_core::reviews::{ReviewPrompt, ReviewQueue, ReviewSubmission, ReviewedDoctorSet};
use dentago_core::store::Session;
use tracing::info;

use crate::api::DentagoApi;
use crate::auth;
use crate::error::ClientResult;

/// Drives the review modal: one doctor at a time, rate or skip.
pub struct ReviewPrompter {
    api: Arc<dyn DentagoApi>,
    session: Session,
    reviewed: ReviewedDoctorSet,
    queue: ReviewQueue,
}

impl ReviewPrompter {
    pub fn new(api: Arc<dyn DentagoApi>, session: Session) -> Self {
        let reviewed = ReviewedDoctorSet::load(session.store().clone());
        Self {
            api,
            session,
            reviewed,
            queue: ReviewQueue::default(),
        }
    }

    /// Rebuild the queue from freshly loaded appointments. Returns its length.
    pub fn load(&mut self, appointments: &[Appointment]) -> usize {
        self.queue = ReviewQueue::build(appointments, &self.reviewed);
        self.queue.len()
    }

    pub fn current(&self) -> Option<&ReviewPrompt> {
        self.queue.current()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn reviewed(&self) -> &ReviewedDoctorSet {
        &self.reviewed
    }

    /// Dismiss the current prompt; the doctor will not be asked again.
    pub fn skip(&mut self) -> ClientResult<Option<ReviewPrompt>> {
        Ok(self.queue.skip(&mut self.reviewed)?)
    }

    /// Submit a rating for the current doctor, then advance. On any failure
    /// the prompt stays current.
    pub async fn rate(&mut self, rating: u8, comment: &str) -> ClientResult<Option<ReviewPrompt>> {
        let review = ReviewSubmission::new(rating, comment)?;
        let Some(doctor_id) = self.queue.current().map(|p| p.doctor_id.clone()) else {
            return Ok(None);
        };

        let token = auth::require_token(&self.session)?;
        let result = self.api.submit_review(&token, &doctor_id, &review).await;
        auth::expire_on_auth(&self.session, result)?;

        info!(doctor = %doctor_id, rating, "Review submitted");
        Ok(self.queue.complete(&mut self.reviewed)?)
    }
}
