//! Dentago Core Library
//!
//! Patient-side domain logic for a dental clinic marketplace. Everything here
//! is synchronous and free of network I/O; the `dentago-client` crate feeds it
//! raw API records and submits what it produces.
//!
//! # Architecture
//!
//! ```text
//! Raw doctor JSON → Normalizer → Doctor list
//!                                    │
//!                         Discovery filter (category + search)
//!                                    │
//!                               selection
//!                                    │
//!              ┌─────────────────────▼─────────────────────┐
//!              │               Booking flow                │
//!              │ date → time → patient info → confirmed    │
//!              └─────────────────────┬─────────────────────┘
//!                                    │
//!                        Appointment list (server)
//!                                    │
//!                Review queue ◄── ReviewedDoctorSet (local store)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Doctor and Appointment types
//! - [`directory`]: Raw record normalization (with gender fallback)
//! - [`discovery`]: Category filters and free-text search
//! - [`booking`]: Booking state machine, phone/time/date helpers, service catalog
//! - [`reviews`]: Review de-duplication set and prompt queue
//! - [`store`]: Key/value persistence port with memory and SQLite backends

pub mod booking;
pub mod directory;
pub mod discovery;
pub mod models;
pub mod reviews;
pub mod store;

// Re-export commonly used types
pub use booking::{
    AppointmentRequest, BookingContext, BookingError, BookingFlow, BookingStep,
    ConfirmedAppointment, PatientForm, Service, SubmissionAck,
};
pub use directory::Normalizer;
pub use discovery::{filter, Category, DiscoveryState, FilterChip};
pub use models::{Appointment, AppointmentStatus, Doctor, DoctorRef, Gender};
pub use reviews::{ReviewQueue, ReviewSubmission, ReviewedDoctorSet};
pub use store::{KeyValueStore, MemoryStore, Session, SqliteStore, StorageKey, StoreError};
