//! HTTP client and screen orchestration for the Dentago patient API.
//!
//! This crate wires `dentago-core` to the remote API: it fetches doctors,
//! submits bookings, keeps favorites in sync, aggregates the user's
//! appointments and drives review prompts. Transport sits behind the
//! [`DentagoApi`] trait; [`HttpApi`] is the `reqwest` implementation.

pub mod api;
pub mod appointments;
pub mod auth;
pub mod booking;
pub mod config;
pub mod directory;
pub mod envelope;
pub mod error;
pub mod favorites;
pub mod reviews;
pub mod screen;

pub use api::{DentagoApi, HttpApi};
pub use appointments::{AppointmentAggregator, AppointmentView};
pub use booking::BookingSubmitter;
pub use config::ClientConfig;
pub use directory::{DirectoryLoad, DoctorDirectory};
pub use error::{ClientError, ClientResult};
pub use favorites::{FavoriteToggle, FavoritesList};
pub use reviews::ReviewPrompter;
pub use screen::ScreenState;

use std::sync::Arc;

use dentago_core::store::{KeyValueStore, Session};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "dentago_client=info,dentago_core=info";

/// Install the global `tracing` subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .try_init();
}

/// Entry point holding the shared API handle, session and configuration.
#[derive(Clone)]
pub struct DentagoClient {
    config: ClientConfig,
    api: Arc<dyn DentagoApi>,
    session: Session,
}

impl DentagoClient {
    /// Client over HTTP with the given configuration and local store.
    pub fn connect(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let api = Arc::new(HttpApi::new(&config)?);
        tracing::info!(base_url = %config.base_url, "Dentago client ready");
        Ok(Self::with_api(config, api, store))
    }

    /// Client over any transport.
    pub fn with_api(
        config: ClientConfig,
        api: Arc<dyn DentagoApi>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            api,
            session: Session::new(store),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn directory(&self) -> DoctorDirectory {
        DoctorDirectory::new(
            self.api.clone(),
            self.config.directory_page_size,
            self.config.directory_sort.clone(),
        )
    }

    pub fn booking(&self) -> BookingSubmitter {
        BookingSubmitter::new(
            self.api.clone(),
            self.session.clone(),
            self.config.clinic_offset(),
        )
    }

    pub fn favorite_toggle(&self, doctor_id: &str) -> FavoriteToggle {
        FavoriteToggle::new(self.api.clone(), self.session.clone(), doctor_id)
    }

    pub fn favorites(&self) -> FavoritesList {
        let directory = self.directory();
        FavoritesList::new(
            self.api.clone(),
            self.session.clone(),
            Arc::new(directory.normalizer().clone()),
        )
    }

    pub fn appointments(&self) -> AppointmentAggregator {
        AppointmentAggregator::new(
            self.api.clone(),
            self.directory(),
            self.session.clone(),
            self.config.clinic_offset(),
        )
    }

    pub fn review_prompter(&self) -> ReviewPrompter {
        ReviewPrompter::new(self.api.clone(), self.session.clone())
    }
}
