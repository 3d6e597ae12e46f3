//! Response envelope adapters, one per endpoint.
//!
//! The API is inconsistent about where it puts payloads (`data`,
//! `appointments`, `results`, bare arrays). Every shape is resolved here so the
//! rest of the crate only sees plain records.

use dentago_core::booking::SubmissionAck;
use serde_json::Value;
use thiserror::Error;

/// Envelope errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unexpected response shape for {0}")]
    UnexpectedShape(&'static str),

    #[error("Malformed body: {0}")]
    Malformed(String),
}

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// `GET /public/doctors` → `{data: [...]}`.
pub fn doctor_listing(body: &Value) -> EnvelopeResult<&[Value]> {
    body.get("data")
        .ok_or(EnvelopeError::MissingField("data"))?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(EnvelopeError::UnexpectedShape("doctor listing"))
}

/// `GET /public/doctors/{id}` → `{success, data}`. `None` when the server
/// reports `success: false`.
pub fn doctor_detail(body: &Value) -> EnvelopeResult<Option<&Value>> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Ok(None);
    }
    match body.get("data") {
        Some(data @ Value::Object(_)) => Ok(Some(data)),
        Some(Value::Null) | None => Err(EnvelopeError::MissingField("data")),
        Some(_) => Err(EnvelopeError::UnexpectedShape("doctor detail")),
    }
}

/// `GET /user/doctors` → array | `{data}` | `{appointments}` | `{results}`.
pub fn appointment_list(body: &Value) -> EnvelopeResult<&[Value]> {
    first_array(body, &["data", "appointments", "results"])
        .ok_or(EnvelopeError::UnexpectedShape("appointment list"))
}

/// `GET /favorites` → array | `{data}` | `{favorites}` | `{doctors}`.
pub fn favorite_list(body: &Value) -> EnvelopeResult<&[Value]> {
    first_array(body, &["data", "favorites", "doctors"])
        .ok_or(EnvelopeError::UnexpectedShape("favorite list"))
}

/// `POST /public/appointments` acknowledgement.
pub fn submission_ack(body: &Value) -> EnvelopeResult<SubmissionAck> {
    if !body.is_object() {
        return Err(EnvelopeError::UnexpectedShape("appointment acknowledgement"));
    }
    serde_json::from_value(body.clone()).map_err(|e| EnvelopeError::Malformed(e.to_string()))
}

/// Whether a favorite entry refers to `doctor_id`. Checks `doctor._id`,
/// `doctor.id`, `doctorId` and `_id`.
pub fn favorite_matches(entry: &Value, doctor_id: &str) -> bool {
    let doctor = entry.get("doctor");
    [
        doctor.and_then(|d| d.get("_id")),
        doctor.and_then(|d| d.get("id")),
        entry.get("doctorId"),
        entry.get("_id"),
    ]
    .into_iter()
    .flatten()
    .any(|v| id_string(v).as_deref() == Some(doctor_id))
}

/// The doctor record inside a favorite entry (the entry itself when flat).
pub fn favorite_doctor(entry: &Value) -> &Value {
    match entry.get("doctor") {
        Some(doctor @ Value::Object(_)) => doctor,
        _ => entry,
    }
}

fn first_array<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a [Value]> {
    if let Value::Array(items) = body {
        return Some(items);
    }
    keys.iter()
        .find_map(|key| body.get(*key)?.as_array())
        .map(Vec::as_slice)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
