//! Review prompt queue.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::ReviewedDoctorSet;
use crate::models::{Appointment, AppointmentStatus};
use crate::store::StoreResult;

/// One pending review prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPrompt {
    pub doctor_id: String,
    /// Earliest confirmed appointment with this doctor
    pub appointment: Appointment,
}

/// Doctors to prompt, in ascending appointment date order.
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    prompts: VecDeque<ReviewPrompt>,
}

impl ReviewQueue {
    /// Build from loaded appointments.
    ///
    /// Keeps confirmed appointments whose doctor is not yet reviewed, one
    /// entry per doctor (the earliest). Appointments without a date sort last.
    pub fn build(appointments: &[Appointment], reviewed: &ReviewedDoctorSet) -> Self {
        let mut candidates: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Confirmed)
            .filter(|a| a.doctor_id().is_some_and(|id| !reviewed.contains(id)))
            .collect();

        candidates.sort_by_key(|a| (a.appointment_date.is_none(), a.appointment_date));

        let mut seen = HashSet::new();
        let prompts: VecDeque<ReviewPrompt> = candidates
            .into_iter()
            .filter_map(|a| {
                let doctor_id = a.doctor_id()?.to_string();
                seen.insert(doctor_id.clone()).then(|| ReviewPrompt {
                    doctor_id,
                    appointment: a.clone(),
                })
            })
            .collect();

        debug!(pending = prompts.len(), "Review queue built");
        Self { prompts }
    }

    /// Prompt currently shown.
    pub fn current(&self) -> Option<&ReviewPrompt> {
        self.prompts.front()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewPrompt> {
        self.prompts.iter()
    }

    /// Skip the current prompt. The doctor is still marked reviewed.
    pub fn skip(&mut self, reviewed: &mut ReviewedDoctorSet) -> StoreResult<Option<ReviewPrompt>> {
        self.advance(reviewed)
    }

    /// Advance after the current doctor's review was submitted.
    pub fn complete(
        &mut self,
        reviewed: &mut ReviewedDoctorSet,
    ) -> StoreResult<Option<ReviewPrompt>> {
        self.advance(reviewed)
    }

    /// Drop prompts for doctors marked elsewhere.
    pub fn retain_unreviewed(&mut self, reviewed: &ReviewedDoctorSet) {
        self.prompts.retain(|p| !reviewed.contains(&p.doctor_id));
    }

    fn advance(&mut self, reviewed: &mut ReviewedDoctorSet) -> StoreResult<Option<ReviewPrompt>> {
        let Some(prompt) = self.prompts.front() else {
            return Ok(None);
        };
        // Mark before popping: a failed write keeps the prompt queued
        reviewed.mark_reviewed(&prompt.doctor_id)?;
        Ok(self.prompts.pop_front())
    }
}
