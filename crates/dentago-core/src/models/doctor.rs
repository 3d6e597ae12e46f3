//! Doctor view model.

use serde::{Deserialize, Serialize};

/// Avatar shown when the directory record carries none.
pub const PLACEHOLDER_AVATAR: &str =
    "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=400&h=300&fit=crop";

/// Display name used when a doctor lookup failed.
pub const PLACEHOLDER_NAME: &str = "Ma'lumot yuklanmadi";

/// Specialty used when a doctor lookup failed.
pub const PLACEHOLDER_SPECIALTY: &str = "---";

/// Doctor gender as shown by the "female doctor" filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Parse an explicit server-provided gender (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "erkak" => Some(Gender::Male),
            "female" | "f" | "ayol" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Working hours of a doctor who is not available around the clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkTime {
    pub start: String,
    pub end: String,
}

/// A normalized doctor record.
///
/// Every field has a fallback so downstream screens never deal with
/// partially populated records. `id` is the key every screen uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Server-assigned identifier
    pub id: String,
    /// Full display name
    pub full_name: String,
    /// Specialty (falls back to the job title)
    pub specialty: String,
    /// Raw job title, when the server sends one separately
    pub job_title: Option<String>,
    /// Avatar URL (placeholder when missing)
    pub avatar_url: String,
    /// Rating in 0..=5
    pub rating: f64,
    /// Distance to the clinic in kilometres
    pub distance_km: f64,
    /// Visit price in so'm
    pub price: u64,
    pub patients_count: u32,
    pub experience_years: u32,
    /// Open 24/7
    pub is_available_24x7: bool,
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub work_time: Option<WorkTime>,
    pub phone: Option<String>,
    pub gender: Gender,
}

impl Doctor {
    /// Create a doctor with required fields and defaults everywhere else.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            specialty: String::new(),
            job_title: None,
            avatar_url: PLACEHOLDER_AVATAR.to_string(),
            rating: 0.0,
            distance_km: 0.0,
            price: 0,
            patients_count: 0,
            experience_years: 0,
            is_available_24x7: false,
            clinic_name: None,
            clinic_address: None,
            work_time: None,
            phone: None,
            gender: Gender::Male,
        }
    }

    /// Stand-in for a doctor whose detail lookup failed.
    pub fn placeholder(id: impl Into<String>) -> Self {
        let mut doctor = Self::new(id, PLACEHOLDER_NAME);
        doctor.specialty = PLACEHOLDER_SPECIALTY.to_string();
        doctor
    }

    /// First letter of the name, used by avatar fallbacks.
    pub fn initial(&self) -> char {
        self.full_name.chars().next().unwrap_or('D')
    }

    /// Human-readable working hours.
    pub fn work_time_label(&self) -> String {
        if self.is_available_24x7 {
            return "24/7 ochiq".to_string();
        }
        match &self.work_time {
            Some(wt) => format!("{} dan {} gacha", wt.start, wt.end),
            None => "9:00 dan 18:00 gacha".to_string(),
        }
    }

    /// Price with thousands grouping, e.g. `150 000 so'm`.
    pub fn price_label(&self) -> String {
        if self.price == 0 {
            return "Narx mavjud emas".to_string();
        }
        format!("{} so'm", group_thousands(self.price))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
