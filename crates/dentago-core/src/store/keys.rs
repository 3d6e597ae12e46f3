//! Every local storage key the app reads or writes.

use std::fmt;

/// A local storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    RefreshToken,
    UserData,
    UserProfile,
    UserPhone,
    UserProfileImage,
    /// Doctor IDs already prompted for review
    ReviewedDoctors,
    /// Cached favorite doctor IDs
    FavoriteDoctors,
}

impl StorageKey {
    /// Keys holding account credentials.
    pub const CREDENTIALS: [StorageKey; 2] = [StorageKey::AccessToken, StorageKey::RefreshToken];

    /// Keys removed on logout. `ReviewedDoctors` is per-device and stays.
    pub const ACCOUNT: [StorageKey; 7] = [
        StorageKey::AccessToken,
        StorageKey::RefreshToken,
        StorageKey::UserData,
        StorageKey::UserProfile,
        StorageKey::UserPhone,
        StorageKey::UserProfileImage,
        StorageKey::FavoriteDoctors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AccessToken => "accessToken",
            StorageKey::RefreshToken => "refreshToken",
            StorageKey::UserData => "userData",
            StorageKey::UserProfile => "userProfile",
            StorageKey::UserPhone => "userPhone",
            StorageKey::UserProfileImage => "userProfileImage",
            StorageKey::ReviewedDoctors => "reviewedDoctors",
            StorageKey::FavoriteDoctors => "favoriteDoctors",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
