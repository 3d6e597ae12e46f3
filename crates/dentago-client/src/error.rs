//! Client error taxonomy.

use dentago_core::booking::BookingError;
use dentago_core::reviews::ReviewError;
use dentago_core::store::StoreError;
use thiserror::Error;

use crate::envelope::EnvelopeError;

/// Client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Token topilmadi. Iltimos tizimga qayta kiring.")]
    Unauthenticated,

    #[error("Unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("Local store error: {0}")]
    Store(#[from] StoreError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ClientError::Unauthorized { status },
            404 => ClientError::NotFound(message),
            _ => ClientError::Http { status, message },
        }
    }

    /// Errors that invalidate the stored credentials.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthenticated | ClientError::Unauthorized { .. }
        )
    }

    /// Banner text for the screen.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) | ClientError::Timeout(_) => {
                "Internet aloqasini tekshiring va qayta urinib ko'ring.".to_string()
            }
            ClientError::Unauthenticated => self.to_string(),
            ClientError::Unauthorized { .. } => {
                "Sessiya muddati tugagan. Iltimos tizimga qayta kiring.".to_string()
            }
            ClientError::NotFound(_) => "Ma'lumot topilmadi.".to_string(),
            ClientError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            ClientError::Booking(e) => e.to_string(),
            ClientError::Review(e) => e.to_string(),
            _ => "Xatolik yuz berdi. Qaytadan urinib ko'ring.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ClientError::from_status(status.as_u16(), e.to_string())
        } else if e.is_decode() {
            ClientError::Envelope(EnvelopeError::Malformed(e.to_string()))
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
