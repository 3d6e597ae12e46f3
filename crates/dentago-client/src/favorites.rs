//! Favorite doctors: the heart toggle on a profile and the favorites screen.

use std::sync::Arc;

use dentago_core::directory::Normalizer;
use dentago_core::models::Doctor;
use dentago_core::store::{FavoriteCache, Session};
use tracing::{debug, warn};

use crate::api::DentagoApi;
use crate::auth;
use crate::envelope;
use crate::error::ClientResult;

/// Favorite state of one doctor, with optimistic toggling.
pub struct FavoriteToggle {
    api: Arc<dyn DentagoApi>,
    session: Session,
    cache: FavoriteCache,
    doctor_id: String,
    is_favorite: bool,
}

impl FavoriteToggle {
    /// Starts from the locally cached state until `refresh` runs.
    pub fn new(api: Arc<dyn DentagoApi>, session: Session, doctor_id: impl Into<String>) -> Self {
        let cache = FavoriteCache::load(session.store().clone());
        let doctor_id = doctor_id.into();
        let is_favorite = cache.contains(&doctor_id);
        Self {
            api,
            session,
            cache,
            doctor_id,
            is_favorite,
        }
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Ask the server whether this doctor is a favorite. Signed-out users
    /// have no favorites.
    pub async fn refresh(&mut self) -> ClientResult<bool> {
        let Some(token) = self.session.access_token()? else {
            self.is_favorite = false;
            return Ok(false);
        };

        let result = self.api.favorites(&token).await;
        let body = auth::expire_on_auth(&self.session, result)?;
        let entries = envelope::favorite_list(&body)?;

        self.is_favorite = entries
            .iter()
            .any(|e| envelope::favorite_matches(e, &self.doctor_id));
        self.remember();
        Ok(self.is_favorite)
    }

    /// Flip the state immediately, then confirm with the server. On failure
    /// the previous state is restored and the error returned.
    pub async fn toggle(&mut self) -> ClientResult<bool> {
        let token = auth::require_token(&self.session)?;
        let previous = self.is_favorite;
        self.is_favorite = !previous;

        let result = if previous {
            self.api.remove_favorite(&token, &self.doctor_id).await
        } else {
            self.api.add_favorite(&token, &self.doctor_id).await
        };

        match auth::expire_on_auth(&self.session, result) {
            Ok(_) => {
                debug!(doctor = %self.doctor_id, favorite = self.is_favorite, "Favorite toggled");
                self.remember();
                Ok(self.is_favorite)
            }
            Err(e) => {
                warn!(doctor = %self.doctor_id, error = %e, "Favorite toggle failed, reverting");
                self.is_favorite = previous;
                Err(e)
            }
        }
    }

    fn remember(&mut self) {
        if let Err(e) = self.cache.set(&self.doctor_id, self.is_favorite) {
            warn!(error = %e, "Failed to cache favorite state");
        }
    }
}

/// The favorites screen.
pub struct FavoritesList {
    api: Arc<dyn DentagoApi>,
    session: Session,
    normalizer: Arc<Normalizer>,
    doctors: Vec<Doctor>,
}

impl FavoritesList {
    pub fn new(api: Arc<dyn DentagoApi>, session: Session, normalizer: Arc<Normalizer>) -> Self {
        Self {
            api,
            session,
            normalizer,
            doctors: Vec::new(),
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Load favorites from the server and refresh the local cache.
    pub async fn load(&mut self) -> ClientResult<&[Doctor]> {
        let token = auth::require_token(&self.session)?;
        let result = self.api.favorites(&token).await;
        let body = auth::expire_on_auth(&self.session, result)?;

        self.doctors = envelope::favorite_list(&body)?
            .iter()
            .map(|entry| self.normalizer.normalize_doctor(envelope::favorite_doctor(entry)))
            .filter(|d| !d.id.is_empty())
            .collect();

        let mut cache = FavoriteCache::load(self.session.store().clone());
        if let Err(e) = cache.replace(self.doctors.iter().map(|d| d.id.clone()).collect()) {
            warn!(error = %e, "Failed to cache favorites");
        }

        debug!(count = self.doctors.len(), "Favorites loaded");
        Ok(self.doctors.as_slice())
    }

    /// Case-insensitive search over name and specialty.
    pub fn search(&self, term: &str) -> Vec<Doctor> {
        let term = term.trim().to_lowercase();
        self.doctors
            .iter()
            .filter(|d| {
                term.is_empty()
                    || d.full_name.to_lowercase().contains(&term)
                    || d.specialty.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Remove a doctor from favorites.
    pub async fn unlike(&mut self, doctor_id: &str) -> ClientResult<()> {
        let token = auth::require_token(&self.session)?;
        let result = self.api.remove_favorite(&token, doctor_id).await;
        auth::expire_on_auth(&self.session, result)?;

        self.doctors.retain(|d| d.id != doctor_id);
        let mut cache = FavoriteCache::load(self.session.store().clone());
        if let Err(e) = cache.set(doctor_id, false) {
            warn!(error = %e, "Failed to cache favorite removal");
        }
        Ok(())
    }
}
