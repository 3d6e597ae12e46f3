//! Doctor directory record normalization.
//!
//! Pipeline: raw API JSON → Normalizer → Doctor / Appointment

mod normalizer;

pub use normalizer::*;
