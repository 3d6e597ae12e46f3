//! "My appointments" aggregation.
//!
//! Appointments reference doctors by ID (sometimes with an embedded record).
//! Each distinct doctor is fetched concurrently; a failed lookup degrades to
//! the embedded record or a placeholder, never failing the whole list.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::FixedOffset;
use dentago_core::directory::Normalizer;
use dentago_core::models::{Appointment, Doctor};
use dentago_core::store::Session;
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::api::DentagoApi;
use crate::auth;
use crate::directory::DoctorDirectory;
use crate::envelope;
use crate::error::ClientResult;

/// One row of the appointments screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub doctor: Doctor,
    pub date_label: String,
    pub time_label: String,
    pub status_label: String,
    pub service_label: String,
}

/// Loads the user's appointments and resolves their doctors.
pub struct AppointmentAggregator {
    api: Arc<dyn DentagoApi>,
    directory: DoctorDirectory,
    session: Session,
    normalizer: Arc<Normalizer>,
    offset: FixedOffset,
}

impl AppointmentAggregator {
    pub fn new(
        api: Arc<dyn DentagoApi>,
        directory: DoctorDirectory,
        session: Session,
        offset: FixedOffset,
    ) -> Self {
        let mut normalizer = directory.normalizer().clone();
        normalizer.set_clinic_offset(offset);
        Self {
            api,
            directory,
            session,
            normalizer: Arc::new(normalizer),
            offset,
        }
    }

    /// Fetch the raw appointment list. No token means no request at all.
    pub async fn fetch_appointments(&self) -> ClientResult<Vec<Appointment>> {
        let token = auth::require_token(&self.session)?;
        let result = self.api.user_appointments(&token).await;
        let body = auth::expire_on_auth(&self.session, result)?;

        Ok(envelope::appointment_list(&body)?
            .iter()
            .map(|r| self.normalizer.normalize_appointment(r))
            .collect())
    }

    /// Fetch appointments and merge each with its doctor.
    pub async fn load(&self) -> ClientResult<Vec<AppointmentView>> {
        let appointments = self.fetch_appointments().await?;
        let doctors = self.resolve_doctors(&appointments).await;

        info!(
            appointments = appointments.len(),
            doctors = doctors.len(),
            "Appointments loaded"
        );

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let doctor = appointment
                    .doctor_id()
                    .and_then(|id| doctors.get(id).cloned())
                    .unwrap_or_else(|| Doctor::placeholder(""));
                self.view(appointment, doctor)
            })
            .collect())
    }

    /// Resolve every distinct doctor concurrently, keyed by ID.
    pub async fn resolve_doctors(&self, appointments: &[Appointment]) -> HashMap<String, Doctor> {
        let mut ids: Vec<&str> = Vec::new();
        for id in appointments.iter().filter_map(Appointment::doctor_id) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let lookups = ids.iter().map(|id| async move {
            (*id, self.directory.fetch_doctor(id).await)
        });

        join_all(lookups)
            .await
            .into_iter()
            .map(|(id, result)| {
                let doctor = result.unwrap_or_else(|e| {
                    warn!(doctor = %id, error = %e, "Doctor lookup failed, using fallback");
                    embedded_doctor(appointments, id).unwrap_or_else(|| Doctor::placeholder(id))
                });
                (id.to_string(), doctor)
            })
            .collect()
    }

    fn view(&self, appointment: Appointment, doctor: Doctor) -> AppointmentView {
        AppointmentView {
            date_label: appointment.date_label(self.offset),
            time_label: appointment.time_label(self.offset),
            status_label: appointment.status.label().to_string(),
            service_label: appointment.service_label().to_string(),
            doctor,
            appointment,
        }
    }
}

fn embedded_doctor(appointments: &[Appointment], doctor_id: &str) -> Option<Doctor> {
    appointments
        .iter()
        .filter_map(|a| a.doctor.as_ref()?.embedded())
        .find(|d| d.id == doctor_id)
        .cloned()
}
