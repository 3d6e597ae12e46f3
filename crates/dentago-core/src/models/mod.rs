//! Domain models for the dentago system.

mod appointment;
mod doctor;

pub use appointment::*;
pub use doctor::*;
