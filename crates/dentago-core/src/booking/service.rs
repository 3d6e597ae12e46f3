//! Fixed service catalog.
//!
//! The API expects the Russian service name; the UI shows the Uzbek label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BookingError;

/// A bookable clinic service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Service {
    Consultation,
    TherapeuticTreatment,
    ToothTreatment,
    Whitening,
    Extraction,
    Implantation,
    Prosthetics,
    Cleaning,
    Filling,
    Diagnostics,
}

impl Service {
    /// Catalog order as shown in the picker.
    pub const ALL: [Service; 10] = [
        Service::Consultation,
        Service::TherapeuticTreatment,
        Service::ToothTreatment,
        Service::Whitening,
        Service::Extraction,
        Service::Implantation,
        Service::Prosthetics,
        Service::Cleaning,
        Service::Filling,
        Service::Diagnostics,
    ];

    /// Value sent to the API.
    pub fn api_value(&self) -> &'static str {
        match self {
            Service::Consultation => "Консультация",
            Service::TherapeuticTreatment => "Терапевтическое лечение",
            Service::ToothTreatment => "Лечение зубов",
            Service::Whitening => "Отбеливание зубов",
            Service::Extraction => "Удаление зубов",
            Service::Implantation => "Имплантация зубов",
            Service::Prosthetics => "Протезирование зубов",
            Service::Cleaning => "Чистка зубов",
            Service::Filling => "Пломбирование зубов",
            Service::Diagnostics => "Диагностика",
        }
    }

    /// Label shown in the picker.
    pub fn label(&self) -> &'static str {
        match self {
            Service::Consultation => "Konsultatsiya",
            Service::TherapeuticTreatment => "Terapevtik davolash",
            Service::ToothTreatment => "Tish davolash",
            Service::Whitening => "Tish oqartirish",
            Service::Extraction => "Tishni olib tashlash",
            Service::Implantation => "Tish implantatsiyasi",
            Service::Prosthetics => "Tish protezlash",
            Service::Cleaning => "Tishlarni tozalash",
            Service::Filling => "Plomba qo'yish",
            Service::Diagnostics => "Diagnostika",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Service {
    type Err = BookingError;

    /// Accepts either the API value or the Uzbek label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Service::ALL
            .into_iter()
            .find(|svc| svc.api_value() == s || svc.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| BookingError::UnknownService(s.to_string()))
    }
}

impl TryFrom<String> for Service {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Service> for String {
    fn from(service: Service) -> Self {
        service.api_value().to_string()
    }
}
