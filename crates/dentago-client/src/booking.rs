//! Appointment submission.

use std::sync::Arc;

use chrono::FixedOffset;
use dentago_core::booking::{BookingFlow, ConfirmedAppointment, PatientForm};
use dentago_core::models::Doctor;
use dentago_core::store::Session;
use tracing::info;

use crate::api::DentagoApi;
use crate::auth;
use crate::envelope;
use crate::error::{ClientError, ClientResult};

/// Starts booking flows and submits their final step.
#[derive(Clone)]
pub struct BookingSubmitter {
    api: Arc<dyn DentagoApi>,
    session: Session,
    offset: FixedOffset,
}

impl BookingSubmitter {
    pub fn new(api: Arc<dyn DentagoApi>, session: Session, offset: FixedOffset) -> Self {
        Self {
            api,
            session,
            offset,
        }
    }

    /// Open a booking flow for `doctor`. Requires a signed-in user.
    pub fn begin(&self, doctor: Doctor) -> ClientResult<BookingFlow> {
        if !self.session.is_authenticated() {
            return Err(ClientError::Unauthenticated);
        }
        Ok(BookingFlow::start(doctor, self.offset))
    }

    /// Validate step 3 and send exactly one appointment request.
    ///
    /// Validation failures return before any network call. A rejected or
    /// failed request leaves the flow on step 3.
    pub async fn submit(
        &self,
        flow: &mut BookingFlow,
        form: &PatientForm,
    ) -> ClientResult<ConfirmedAppointment> {
        let request = flow.prepare_submission(form)?;
        let token = self.session.access_token()?;

        info!(flow = %flow.id(), doctor = %request.doctor_id, "Submitting appointment");
        let result = self.api.create_appointment(&request, token.as_deref()).await;
        let body = auth::expire_on_auth(&self.session, result)?;

        let ack = envelope::submission_ack(&body)?;
        Ok(flow.confirm(request, ack)?)
    }
}
