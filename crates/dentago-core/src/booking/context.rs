//! Data carried between booking steps and the submission payload.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DateLabel, Service};
use crate::models::Doctor;

/// Email sent when the patient leaves the field blank.
pub const DEFAULT_EMAIL: &str = "bemor@example.com";

/// Everything chosen so far in one booking flow. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingContext {
    pub doctor_id: String,
    pub doctor: Option<Doctor>,
    /// Calendar day picked in step 1
    pub day: Option<NaiveDate>,
    pub date_label: Option<DateLabel>,
    /// Local midnight after step 1, day plus time after step 2
    pub appointment_date: Option<DateTime<Utc>>,
    /// `HH:MM`, set in step 2
    pub appointment_time: Option<String>,
    pub note: Option<String>,
}

impl BookingContext {
    pub fn for_doctor(doctor: Doctor) -> Self {
        Self {
            doctor_id: doctor.id.clone(),
            doctor: Some(doctor),
            ..Self::default()
        }
    }

    /// `appointment_date` as ISO-8601 with milliseconds and `Z`.
    pub fn appointment_date_iso(&self) -> Option<String> {
        self.appointment_date.map(to_iso_millis)
    }
}

pub(crate) fn to_iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Patient input collected in step 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service: Option<Service>,
    pub comment: Option<String>,
}

impl PatientForm {
    /// Blank form with the step-2 note copied into the comment.
    pub fn prefilled(context: &BookingContext) -> Self {
        Self {
            comment: context.note.clone(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub full_name: String,
    /// `+998XXXXXXXXX`
    pub phone: String,
    pub email: String,
}

/// Body of `POST /public/appointments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub doctor_id: String,
    pub patient: PatientInfo,
    pub appointment_date: String,
    pub appointment_time: String,
    pub service: Service,
    pub comment: String,
}

/// Server acknowledgement of an appointment submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Snapshot shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedAppointment {
    pub request: AppointmentRequest,
    pub doctor: Option<Doctor>,
    pub date_label: Option<DateLabel>,
    pub ack: SubmissionAck,
}

impl ConfirmedAppointment {
    /// Server-assigned appointment ID, if the acknowledgement carried one.
    pub fn appointment_id(&self) -> Option<&str> {
        let data = self.ack.data.as_ref()?;
        data.get("_id")
            .or_else(|| data.get("id"))
            .and_then(Value::as_str)
    }
}
