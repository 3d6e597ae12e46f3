//! Appointment models (server-owned, read-only on this side).

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;

/// Appointment status as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// Any status string this client does not know about
    Other(String),
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => AppointmentStatus::Pending,
            "confirmed" => AppointmentStatus::Confirmed,
            "completed" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(value),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Pending => "pending".into(),
            AppointmentStatus::Confirmed => "confirmed".into(),
            AppointmentStatus::Completed => "completed".into(),
            AppointmentStatus::Cancelled => "cancelled".into(),
            AppointmentStatus::Other(s) => s,
        }
    }
}

impl AppointmentStatus {
    /// Badge label.
    pub fn label(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "Kutilmoqda",
            AppointmentStatus::Confirmed => "Tasdiqlangan",
            AppointmentStatus::Completed => "Yakunlangan",
            AppointmentStatus::Cancelled => "Bekor qilingan",
            AppointmentStatus::Other(s) if s.trim().is_empty() => "Noma'lum",
            AppointmentStatus::Other(s) => s,
        }
    }
}

/// The doctor field of an appointment: either a bare ID or an embedded record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DoctorRef {
    Id(String),
    Embedded(Doctor),
}

impl DoctorRef {
    /// The referenced doctor ID, if it is non-empty.
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            DoctorRef::Id(id) => id.as_str(),
            DoctorRef::Embedded(doctor) => doctor.id.as_str(),
        };
        (!id.is_empty()).then_some(id)
    }

    /// The embedded doctor record, if the server sent one.
    pub fn embedded(&self) -> Option<&Doctor> {
        match self {
            DoctorRef::Embedded(doctor) => Some(doctor),
            DoctorRef::Id(_) => None,
        }
    }
}

/// An appointment belonging to the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Option<String>,
    pub doctor: Option<DoctorRef>,
    pub status: AppointmentStatus,
    pub appointment_date: Option<DateTime<Utc>>,
    /// "HH:MM" as submitted
    pub appointment_time: Option<String>,
    pub service: Option<String>,
    pub comment: Option<String>,
}

impl Appointment {
    /// Doctor ID regardless of how the doctor was referenced.
    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor.as_ref().and_then(DoctorRef::id)
    }

    /// Date label (`dd.mm.yyyy`) in the clinic's offset.
    pub fn date_label(&self, offset: FixedOffset) -> String {
        self.appointment_date
            .map(|d| d.with_timezone(&offset).format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Time label: the submitted time, else derived from the date.
    pub fn time_label(&self, offset: FixedOffset) -> String {
        if let Some(time) = self.appointment_time.as_deref().filter(|t| !t.is_empty()) {
            return time.to_string();
        }
        self.appointment_date
            .map(|d| d.with_timezone(&offset).format("%H:%M").to_string())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Service label, with a generic checkup as the fallback.
    pub fn service_label(&self) -> &str {
        self.service
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Umumiy ko'rik")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tashkent() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600).unwrap()
    }

    fn make_appointment() -> Appointment {
        Appointment {
            id: Some("a1".into()),
            doctor: Some(DoctorRef::Id("d1".into())),
            status: AppointmentStatus::Confirmed,
            appointment_date: Some(Utc.with_ymd_and_hms(2026, 1, 15, 5, 30, 0).unwrap()),
            appointment_time: None,
            service: None,
            comment: None,
        }
    }

    #[test]
    fn test_status_from_string() {
        assert_eq!(AppointmentStatus::from("Confirmed".to_string()), AppointmentStatus::Confirmed);
        assert_eq!(AppointmentStatus::from("canceled".to_string()), AppointmentStatus::Cancelled);
        assert_eq!(
            AppointmentStatus::from("rescheduled".to_string()),
            AppointmentStatus::Other("rescheduled".into())
        );
    }

    #[test]
    fn test_status_serde_roundtrip_keeps_unknown() {
        let json = serde_json::to_string(&AppointmentStatus::Other("rescheduled".into())).unwrap();
        assert_eq!(json, "\"rescheduled\"");
        let status: AppointmentStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AppointmentStatus::Pending.label(), "Kutilmoqda");
        assert_eq!(AppointmentStatus::Other(String::new()).label(), "Noma'lum");
    }

    #[test]
    fn test_doctor_ref_id() {
        assert_eq!(DoctorRef::Id("d1".into()).id(), Some("d1"));
        assert_eq!(DoctorRef::Id(String::new()).id(), None);

        let embedded = DoctorRef::Embedded(Doctor::new("d2", "Nodira"));
        assert_eq!(embedded.id(), Some("d2"));
        assert!(embedded.embedded().is_some());
    }

    #[test]
    fn test_time_label_falls_back_to_date() {
        let mut appt = make_appointment();
        assert_eq!(appt.time_label(tashkent()), "10:30");
        assert_eq!(appt.date_label(tashkent()), "15.01.2026");

        appt.appointment_time = Some("11:00".into());
        assert_eq!(appt.time_label(tashkent()), "11:00");
    }

    #[test]
    fn test_service_label_fallback() {
        let mut appt = make_appointment();
        assert_eq!(appt.service_label(), "Umumiy ko'rik");
        appt.service = Some("Диагностика".into());
        assert_eq!(appt.service_label(), "Диагностика");
    }
}
