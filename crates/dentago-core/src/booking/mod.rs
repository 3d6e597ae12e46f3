//! Appointment booking flow.
//!
//! Steps: SelectingDate → SelectingTime → EnteringPatientInfo → Confirmed
//!
//! Each transition validates its own input and the context left by earlier
//! steps. Nothing here talks to the network: `prepare_submission` builds the
//! request body and `confirm` folds the server acknowledgement back in.
//! Abandoning a booking is just dropping the flow.

mod context;
mod phone;
mod service;
mod slots;

pub use context::*;
pub use phone::*;
pub use service::*;
pub use slots::*;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::Doctor;

/// Booking errors. Messages are shown to the patient as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("O'tgan sanani tanlab bo'lmaydi")]
    PastDate,

    #[error("Vaqtni tanlang")]
    MissingTime,

    #[error("Vaqt noto'g'ri formatda: {0} (masalan: 09:30)")]
    InvalidTime(String),

    #[error("Ism va familiyani kiriting")]
    MissingFullName,

    #[error("Telefon raqami noto'g'ri (masalan: 901234567)")]
    InvalidPhone,

    #[error("Xizmat turini tanlang")]
    MissingService,

    #[error("Noma'lum xizmat: {0}")]
    UnknownService(String),

    #[error("Shifokor tanlanmagan. Jarayonni boshidan boshlang.")]
    MissingDoctor,

    #[error("Sana yoki vaqt tanlanmagan.")]
    MissingDateTime,

    #[error("Ma'lumotlar yetarli emas ({0}). Jarayonni boshidan boshlang.")]
    MissingContext(&'static str),

    #[error("Bu amal {actual:?} bosqichida bajarilmaydi")]
    WrongStep { actual: BookingStep },

    #[error("{0}")]
    Rejected(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Date,
    Time,
    FullName,
    Phone,
    Service,
}

impl BookingError {
    /// The field to highlight, for validation errors.
    pub fn field(&self) -> Option<BookingField> {
        match self {
            BookingError::PastDate => Some(BookingField::Date),
            BookingError::MissingTime | BookingError::InvalidTime(_) => Some(BookingField::Time),
            BookingError::MissingFullName => Some(BookingField::FullName),
            BookingError::InvalidPhone => Some(BookingField::Phone),
            BookingError::MissingService | BookingError::UnknownService(_) => {
                Some(BookingField::Service)
            }
            _ => None,
        }
    }
}

/// Current step of a booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    SelectingDate,
    SelectingTime,
    EnteringPatientInfo,
    Confirmed,
}

impl BookingStep {
    /// 1-based position for the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::SelectingDate => 1,
            BookingStep::SelectingTime => 2,
            BookingStep::EnteringPatientInfo => 3,
            BookingStep::Confirmed => 4,
        }
    }
}

const DEFAULT_REJECTION: &str = "Uchrashuvni yaratishda xatolik yuz berdi";

/// One in-progress booking.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    id: Uuid,
    step: BookingStep,
    offset: FixedOffset,
    context: BookingContext,
}

impl BookingFlow {
    /// Start booking with the given doctor. `offset` is the clinic's local offset.
    pub fn start(doctor: Doctor, offset: FixedOffset) -> Self {
        Self::restore(
            BookingStep::SelectingDate,
            BookingContext::for_doctor(doctor),
            offset,
        )
    }

    /// Resume a flow at an arbitrary step. Later guards report whatever
    /// context is missing.
    pub fn restore(step: BookingStep, context: BookingContext, offset: FixedOffset) -> Self {
        let id = Uuid::new_v4();
        debug!(flow = %id, doctor = %context.doctor_id, ?step, "Booking flow opened");
        Self {
            id,
            step,
            offset,
            context,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn context(&self) -> &BookingContext {
        &self.context
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Today in the clinic's offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    /// Step 1: pick a calendar day (today or later).
    pub fn select_date(&mut self, day: NaiveDate, today: NaiveDate) -> BookingResult<()> {
        self.expect_step(BookingStep::SelectingDate)?;
        if day < today {
            return Err(BookingError::PastDate);
        }

        let midnight = self.local_instant(day, NaiveTime::MIN)?;
        self.context.day = Some(day);
        self.context.date_label = Some(DateLabel::from_date(day));
        self.context.appointment_date = Some(midnight);
        self.context.appointment_time = None;
        self.step = BookingStep::SelectingTime;

        info!(flow = %self.id, %day, "Booking date selected");
        Ok(())
    }

    /// Step 2: pick a time, typed (`HH:MM`) or one of the half-hour slots.
    pub fn select_time(&mut self, input: &str, note: Option<String>) -> BookingResult<()> {
        self.expect_step(BookingStep::SelectingTime)?;
        let day = self.context.day.ok_or(BookingError::MissingContext("sana"))?;

        let input = input.trim();
        if input.is_empty() {
            return Err(BookingError::MissingTime);
        }
        let time = parse_time(input).ok_or_else(|| BookingError::InvalidTime(input.to_string()))?;

        self.context.appointment_date = Some(self.local_instant(day, time)?);
        self.context.appointment_time = Some(time.format("%H:%M").to_string());
        self.context.note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.step = BookingStep::EnteringPatientInfo;

        info!(flow = %self.id, time = %input, "Booking time selected");
        Ok(())
    }

    /// Step back one screen. No-op on the first and last steps. Leaving
    /// patient info drops the chosen time; it must be picked again.
    pub fn back(&mut self) -> BookingStep {
        self.step = match self.step {
            BookingStep::SelectingTime => BookingStep::SelectingDate,
            BookingStep::EnteringPatientInfo => {
                self.context.appointment_time = None;
                BookingStep::SelectingTime
            }
            other => other,
        };
        self.step
    }

    /// Patient form for step 3, pre-filled from the context.
    pub fn patient_form(&self) -> PatientForm {
        PatientForm::prefilled(&self.context)
    }

    /// Step 3: validate the patient form against the context and build the
    /// request body. Rejects locally before any network call.
    pub fn prepare_submission(&self, form: &PatientForm) -> BookingResult<AppointmentRequest> {
        self.expect_step(BookingStep::EnteringPatientInfo)?;
        if self.context.doctor_id.trim().is_empty() {
            return Err(BookingError::MissingDoctor);
        }
        let (Some(appointment_date), Some(appointment_time)) = (
            self.context.appointment_date_iso(),
            self.context.appointment_time.clone(),
        ) else {
            return Err(BookingError::MissingDateTime);
        };

        let full_name = form.full_name.trim();
        if full_name.is_empty() {
            return Err(BookingError::MissingFullName);
        }
        let phone = normalize_phone(&form.phone).ok_or(BookingError::InvalidPhone)?;
        let service = form.service.ok_or(BookingError::MissingService)?;

        let email = form
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EMAIL)
            .to_string();
        let comment = form
            .comment
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Ok(AppointmentRequest {
            doctor_id: self.context.doctor_id.clone(),
            patient: PatientInfo {
                full_name: full_name.to_string(),
                phone,
                email,
            },
            appointment_date,
            appointment_time,
            service,
            comment,
        })
    }

    /// Fold the server's answer into the flow. Anything but `success: true`
    /// keeps the flow on step 3 so the patient can retry.
    pub fn confirm(
        &mut self,
        request: AppointmentRequest,
        ack: SubmissionAck,
    ) -> BookingResult<ConfirmedAppointment> {
        self.expect_step(BookingStep::EnteringPatientInfo)?;

        if !ack.success {
            let message = ack
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            warn!(flow = %self.id, %message, "Appointment rejected");
            return Err(BookingError::Rejected(message));
        }

        self.step = BookingStep::Confirmed;
        info!(flow = %self.id, doctor = %request.doctor_id, "Appointment confirmed");

        Ok(ConfirmedAppointment {
            request,
            doctor: self.context.doctor.clone(),
            date_label: self.context.date_label.clone(),
            ack,
        })
    }

    fn expect_step(&self, expected: BookingStep) -> BookingResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(BookingError::WrongStep { actual: self.step })
        }
    }

    fn local_instant(&self, day: NaiveDate, time: NaiveTime) -> BookingResult<chrono::DateTime<Utc>> {
        NaiveDateTime::new(day, time)
            .and_local_timezone(self.offset)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or(BookingError::MissingContext("sana"))
    }
}
