//! Typed views over the store: signed-in session and cached favorites.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::{load_json, save_json, KeyValueStore, StorageKey, StoreResult};

/// Name shown when no profile is cached.
pub const GUEST_NAME: &str = "mehmon";

/// The signed-in user's credentials and cached profile.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Bearer token, if present and non-empty.
    pub fn access_token(&self) -> StoreResult<Option<String>> {
        Ok(self
            .store
            .get(StorageKey::AccessToken)?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Login guard for booking and favorites.
    pub fn is_authenticated(&self) -> bool {
        match self.access_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read access token");
                false
            }
        }
    }

    pub fn set_tokens(&self, access: &str, refresh: Option<&str>) -> StoreResult<()> {
        self.store.set(StorageKey::AccessToken, access)?;
        match refresh {
            Some(refresh) => self.store.set(StorageKey::RefreshToken, refresh),
            None => self.store.remove(StorageKey::RefreshToken),
        }
    }

    /// Drop the tokens only, e.g. after the server answers 401.
    pub fn clear_credentials(&self) -> StoreResult<()> {
        for key in StorageKey::CREDENTIALS {
            self.store.remove(key)?;
        }
        info!("Credentials cleared");
        Ok(())
    }

    /// Remove every account key. The reviewed-doctor set survives.
    pub fn logout(&self) -> StoreResult<()> {
        for key in StorageKey::ACCOUNT {
            self.store.remove(key)?;
        }
        info!("Logged out");
        Ok(())
    }

    pub fn set_user_data(&self, user: &Value) -> StoreResult<()> {
        save_json(self.store.as_ref(), StorageKey::UserData, user)
    }

    /// Greeting name from cached `userData`, else `mehmon`.
    pub fn display_name(&self) -> String {
        let user: Option<Value> = match load_json(self.store.as_ref(), StorageKey::UserData) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Cached user data unreadable");
                None
            }
        };

        user.as_ref()
            .and_then(|u| {
                ["fullName", "name", "firstName"]
                    .iter()
                    .find_map(|key| u.get(*key)?.as_str())
            })
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GUEST_NAME.to_string())
    }

    pub fn user_phone(&self) -> StoreResult<Option<String>> {
        self.store.get(StorageKey::UserPhone)
    }
}

/// Locally cached favorite doctor IDs, refreshed from the server.
pub struct FavoriteCache {
    store: Arc<dyn KeyValueStore>,
    ids: Vec<String>,
}

impl FavoriteCache {
    /// Load from the store. A corrupt entry is treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ids = match load_json::<Vec<String>>(store.as_ref(), StorageKey::FavoriteDoctors) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Favorite cache unreadable, starting empty");
                Vec::new()
            }
        };
        Self { store, ids }
    }

    pub fn contains(&self, doctor_id: &str) -> bool {
        self.ids.iter().any(|id| id == doctor_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Set membership and persist.
    pub fn set(&mut self, doctor_id: &str, favorite: bool) -> StoreResult<()> {
        if favorite {
            if !self.contains(doctor_id) {
                self.ids.push(doctor_id.to_string());
            }
        } else {
            self.ids.retain(|id| id != doctor_id);
        }
        self.persist()
    }

    /// Replace the whole cache with server state.
    pub fn replace(&mut self, ids: Vec<String>) -> StoreResult<()> {
        self.ids.clear();
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
        self.persist()
    }

    fn persist(&self) -> StoreResult<()> {
        save_json(self.store.as_ref(), StorageKey::FavoriteDoctors, &self.ids)
    }
}
