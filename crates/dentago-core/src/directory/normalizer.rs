//! Raw API record normalizer.
//!
//! Handles:
//! - Field aliasing (`_id`/`id`, `fullName`/`name`, `specialty`/`job`, ...)
//! - Numeric fields sent as numbers or numeric strings
//! - Gender resolution (explicit value, else name heuristic)
//!
//! The name heuristic is a locale-specific, biased guess based on common
//! Uzbek/Russian feminine name endings. It only runs when the server did not
//! send a recognizable gender.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde_json::Value;

use crate::models::{
    Appointment, AppointmentStatus, Doctor, DoctorRef, Gender, WorkTime, PLACEHOLDER_AVATAR,
};

/// Clinic offset assumed when none is configured (Tashkent, +05:00).
pub const CLINIC_UTC_OFFSET_SECS: i32 = 5 * 3600;

const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Normalizer for raw doctor and appointment records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Lowercase substrings that mark a feminine full name
    feminine_markers: Vec<String>,
    /// Avatar used when none is present
    placeholder_avatar: String,
    /// Offset applied to appointment dates sent without one
    clinic_offset: FixedOffset,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with default mappings.
    pub fn new() -> Self {
        Self {
            feminine_markers: Self::default_feminine_markers(),
            placeholder_avatar: PLACEHOLDER_AVATAR.to_string(),
            clinic_offset: FixedOffset::east_opt(CLINIC_UTC_OFFSET_SECS)
                .unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Normalize one raw doctor record.
    pub fn normalize_doctor(&self, raw: &Value) -> Doctor {
        let clinic = raw.get("clinic");

        let id = first_string(raw, &["_id", "id"]).unwrap_or_default();
        let full_name = first_string(raw, &["fullName", "name", "fullname"]).unwrap_or_default();
        let job_title = first_string(raw, &["job"]);
        let specialty =
            first_string(raw, &["specialty", "job", "speciality"]).unwrap_or_default();

        let avatar_url = first_string(raw, &["avatar", "img", "photo", "image"])
            .unwrap_or_else(|| self.placeholder_avatar.clone());

        let distance_km = clinic
            .and_then(|c| number(c, "distanceKm"))
            .or_else(|| number(raw, "distance"))
            .unwrap_or(0.0);

        let (clinic_name, clinic_address) = match clinic {
            Some(Value::String(name)) if !name.trim().is_empty() => (Some(name.clone()), None),
            Some(c @ Value::Object(_)) => (
                first_string(c, &["name"]),
                first_string(c, &["address", "location"]),
            ),
            _ => (None, None),
        };

        let work_time = raw.get("workTime").and_then(|wt| {
            Some(WorkTime {
                start: first_string(wt, &["start"])?,
                end: first_string(wt, &["end"])?,
            })
        });

        let explicit_gender = first_string(raw, &["gender"]);
        let gender = self.resolve_gender(explicit_gender.as_deref(), &full_name);

        Doctor {
            id,
            job_title,
            specialty,
            avatar_url,
            rating: first_number(raw, &["rating"]).unwrap_or(0.0).clamp(0.0, 5.0),
            distance_km: distance_km.max(0.0),
            price: to_unsigned(first_number(raw, &["price"])) as u64,
            patients_count: to_unsigned(first_number(raw, &["patientsCount", "patients"])) as u32,
            experience_years: to_unsigned(first_number(raw, &["experienceYears", "exp"])) as u32,
            is_available_24x7: first_bool(raw, &["isAvailable24x7", "service"]).unwrap_or(false),
            clinic_name,
            clinic_address,
            work_time,
            phone: first_string(raw, &["phone", "phoneNumber"]),
            gender,
            full_name,
        }
    }

    /// Normalize one raw appointment record.
    pub fn normalize_appointment(&self, raw: &Value) -> Appointment {
        let doctor = match raw.get("doctor") {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(DoctorRef::Id(id.clone())),
            Some(obj @ Value::Object(_)) => Some(DoctorRef::Embedded(self.normalize_doctor(obj))),
            _ => first_string(raw, &["doctorId"]).map(DoctorRef::Id),
        };

        let appointment_date = first_string(raw, &["appointmentDate", "date"])
            .and_then(|s| self.parse_instant(&s));

        Appointment {
            id: first_string(raw, &["_id", "id"]),
            doctor,
            status: AppointmentStatus::from(first_string(raw, &["status"]).unwrap_or_default()),
            appointment_date,
            appointment_time: first_string(raw, &["appointmentTime", "time"]),
            service: first_string(raw, &["service"]),
            comment: first_string(raw, &["comment"]),
        }
    }

    /// Explicit gender wins; otherwise fall back to the name heuristic.
    pub fn resolve_gender(&self, explicit: Option<&str>, full_name: &str) -> Gender {
        explicit
            .and_then(Gender::parse)
            .unwrap_or_else(|| self.infer_gender(full_name))
    }

    /// Guess gender from name substrings. Last resort only.
    pub fn infer_gender(&self, full_name: &str) -> Gender {
        let lower = full_name.to_lowercase();
        if self
            .feminine_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
        {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Add a custom feminine name marker.
    pub fn add_feminine_marker(&mut self, marker: &str) {
        self.feminine_markers.push(marker.to_lowercase());
    }

    /// Offset used for dates without one (`2026-03-08`, `2026-03-08T10:00:00`).
    pub fn set_clinic_offset(&mut self, offset: FixedOffset) {
        self.clinic_offset = offset;
    }

    pub fn clinic_offset(&self) -> FixedOffset {
        self.clinic_offset
    }

    /// RFC 3339 first, then a naive date-time or a bare date read in the
    /// clinic's offset. A bare date means local midnight.
    pub fn parse_instant(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(d) = DateTime::parse_from_rfc3339(raw) {
            return Some(d.with_timezone(&Utc));
        }
        let naive = NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;
        naive
            .and_local_timezone(self.clinic_offset)
            .single()
            .map(|local| local.with_timezone(&Utc))
    }

    /// Override the placeholder avatar.
    pub fn set_placeholder_avatar(&mut self, url: &str) {
        self.placeholder_avatar = url.to_string();
    }

    /// Default feminine name endings.
    fn default_feminine_markers() -> Vec<String> {
        ["ova", "eva", "aya", "iya", "oy", "qiz", "xon"]
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}

/// First non-empty string among the given keys.
fn first_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Number or numeric string at `key`.
fn number(raw: &Value, key: &str) -> Option<f64> {
    let parsed = match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn first_number(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number(raw, key))
}

fn first_bool(raw: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| raw.get(*key)?.as_bool())
}

fn to_unsigned(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).max(0.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_record() {
        let normalizer = Normalizer::new();
        let raw = json!({
            "_id": "65a1",
            "fullName": "Dilnoza Karimova",
            "specialty": "Terapevt",
            "avatar": "https://cdn/x.png",
            "rating": 4.7,
            "price": 150000,
            "patientsCount": 120,
            "experienceYears": 8,
            "isAvailable24x7": true,
            "clinic": { "name": "Smile", "address": "Chilonzor 5", "distanceKm": 2.5 },
            "workTime": { "start": "09:00", "end": "18:00" },
            "phone": "+998901112233"
        });

        let doctor = normalizer.normalize_doctor(&raw);

        assert_eq!(doctor.id, "65a1");
        assert_eq!(doctor.full_name, "Dilnoza Karimova");
        assert_eq!(doctor.specialty, "Terapevt");
        assert_eq!(doctor.avatar_url, "https://cdn/x.png");
        assert_eq!(doctor.rating, 4.7);
        assert_eq!(doctor.price, 150_000);
        assert_eq!(doctor.patients_count, 120);
        assert_eq!(doctor.experience_years, 8);
        assert!(doctor.is_available_24x7);
        assert_eq!(doctor.clinic_name.as_deref(), Some("Smile"));
        assert_eq!(doctor.clinic_address.as_deref(), Some("Chilonzor 5"));
        assert_eq!(doctor.distance_km, 2.5);
        assert_eq!(doctor.gender, Gender::Female);
        assert_eq!(doctor.phone.as_deref(), Some("+998901112233"));
    }

    #[test]
    fn test_normalize_empty_record_uses_fallbacks() {
        let normalizer = Normalizer::new();
        let doctor = normalizer.normalize_doctor(&json!({}));

        assert_eq!(doctor.id, "");
        assert_eq!(doctor.full_name, "");
        assert_eq!(doctor.avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(doctor.rating, 0.0);
        assert_eq!(doctor.price, 0);
        assert!(!doctor.is_available_24x7);
        assert_eq!(doctor.gender, Gender::Male);
        assert!(doctor.clinic_name.is_none());
    }

    #[test]
    fn test_normalize_legacy_aliases() {
        let normalizer = Normalizer::new();
        let raw = json!({
            "id": 7,
            "name": "Bobur Aliyev",
            "job": "Ortodont",
            "img": "a.png",
            "distance": "3.2",
            "patients": "40",
            "exp": 3,
            "service": true,
            "rating": "4.1"
        });

        let doctor = normalizer.normalize_doctor(&raw);

        assert_eq!(doctor.id, "7");
        assert_eq!(doctor.full_name, "Bobur Aliyev");
        assert_eq!(doctor.specialty, "Ortodont");
        assert_eq!(doctor.job_title.as_deref(), Some("Ortodont"));
        assert_eq!(doctor.avatar_url, "a.png");
        assert_eq!(doctor.distance_km, 3.2);
        assert_eq!(doctor.patients_count, 40);
        assert_eq!(doctor.experience_years, 3);
        assert!(doctor.is_available_24x7);
        assert_eq!(doctor.rating, 4.1);
    }

    #[test]
    fn test_clinic_as_plain_string() {
        let normalizer = Normalizer::new();
        let doctor = normalizer.normalize_doctor(&json!({ "clinic": "Dento Lux" }));
        assert_eq!(doctor.clinic_name.as_deref(), Some("Dento Lux"));
        assert!(doctor.clinic_address.is_none());
    }

    #[test]
    fn test_explicit_gender_wins() {
        let normalizer = Normalizer::new();

        let doctor = normalizer.normalize_doctor(&json!({
            "fullName": "Malika Ahmedova",
            "gender": "MALE"
        }));
        assert_eq!(doctor.gender, Gender::Male);

        let doctor = normalizer.normalize_doctor(&json!({
            "fullName": "Sardor Rahimov",
            "gender": "Female"
        }));
        assert_eq!(doctor.gender, Gender::Female);
    }

    #[test]
    fn test_unrecognized_gender_falls_back_to_heuristic() {
        let normalizer = Normalizer::new();
        let doctor = normalizer.normalize_doctor(&json!({
            "fullName": "Gulnora Qodirova",
            "gender": "n/a"
        }));
        assert_eq!(doctor.gender, Gender::Female);
    }

    #[test]
    fn test_infer_gender() {
        let normalizer = Normalizer::new();

        assert_eq!(normalizer.infer_gender("Nilufar Rashidova"), Gender::Female);
        assert_eq!(normalizer.infer_gender("Zulfiya"), Gender::Female);
        assert_eq!(normalizer.infer_gender("Muhabbat Nurxon"), Gender::Female);
        assert_eq!(normalizer.infer_gender("Jasur Tursunov"), Gender::Male);
    }

    #[test]
    fn test_custom_feminine_marker() {
        let mut normalizer = Normalizer::new();
        assert_eq!(normalizer.infer_gender("Anna Smith"), Gender::Male);

        normalizer.add_feminine_marker("ANNA");
        assert_eq!(normalizer.infer_gender("Anna Smith"), Gender::Female);
    }

    #[test]
    fn test_negative_and_out_of_range_numbers_clamped() {
        let normalizer = Normalizer::new();
        let doctor = normalizer.normalize_doctor(&json!({
            "rating": 7.5,
            "price": -100,
            "experienceYears": 2.6
        }));
        assert_eq!(doctor.rating, 5.0);
        assert_eq!(doctor.price, 0);
        assert_eq!(doctor.experience_years, 3);
    }

    #[test]
    fn test_normalize_appointment_with_bare_doctor_id() {
        let normalizer = Normalizer::new();
        let appt = normalizer.normalize_appointment(&json!({
            "_id": "ap1",
            "doctor": "d1",
            "status": "confirmed",
            "appointmentDate": "2026-01-15T05:30:00.000Z",
            "appointmentTime": "10:30",
            "service": "Диагностика"
        }));

        assert_eq!(appt.id.as_deref(), Some("ap1"));
        assert_eq!(appt.doctor_id(), Some("d1"));
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
        assert_eq!(
            appt.appointment_date.map(|d| d.to_rfc3339()),
            Some("2026-01-15T05:30:00+00:00".to_string())
        );
        assert_eq!(appt.appointment_time.as_deref(), Some("10:30"));
    }

    #[test]
    fn test_normalize_appointment_with_embedded_doctor() {
        let normalizer = Normalizer::new();
        let appt = normalizer.normalize_appointment(&json!({
            "doctor": { "_id": "d9", "fullName": "Aziza Umarova" },
            "status": "pending",
            "appointmentDate": "not a date"
        }));

        assert_eq!(appt.doctor_id(), Some("d9"));
        let embedded = appt.doctor.as_ref().and_then(DoctorRef::embedded).unwrap();
        assert_eq!(embedded.full_name, "Aziza Umarova");
        assert!(appt.appointment_date.is_none());
        assert_eq!(appt.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_normalize_appointment_doctor_id_field() {
        let normalizer = Normalizer::new();
        let appt = normalizer.normalize_appointment(&json!({ "doctorId": "d3" }));
        assert_eq!(appt.doctor_id(), Some("d3"));
        assert_eq!(appt.status, AppointmentStatus::Other(String::new()));
    }

    #[test]
    fn test_appointment_date_without_offset_uses_clinic_offset() {
        let normalizer = Normalizer::new();

        let date_only = normalizer.normalize_appointment(&json!({ "appointmentDate": "2026-03-08" }));
        assert_eq!(
            date_only.appointment_date.map(|d| d.to_rfc3339()),
            Some("2026-03-07T19:00:00+00:00".to_string())
        );

        let naive = normalizer.normalize_appointment(&json!({ "date": "2026-03-08T10:30:00" }));
        assert_eq!(
            naive.appointment_date.map(|d| d.to_rfc3339()),
            Some("2026-03-08T05:30:00+00:00".to_string())
        );

        let mut utc = Normalizer::new();
        utc.set_clinic_offset(FixedOffset::east_opt(0).unwrap());
        assert_eq!(
            utc.parse_instant("2026-03-08 10:30:00").map(|d| d.to_rfc3339()),
            Some("2026-03-08T10:30:00+00:00".to_string())
        );
        assert!(utc.parse_instant("08.03.2026").is_none());
    }
}
