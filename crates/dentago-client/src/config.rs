//! Client configuration.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://app.dentago.uz/api";

/// Runtime configuration for the API client and screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// `limit` for the doctor listing; large enough to mean "all"
    pub directory_page_size: u32,
    /// `sort` for the doctor listing
    pub directory_sort: String,
    /// Clinic local offset used for calendar days and times
    pub clinic_utc_offset_minutes: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            directory_page_size: 100,
            directory_sort: "-rating".to_string(),
            clinic_utc_offset_minutes: 5 * 60,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden from `DENTAGO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("DENTAGO_API_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("DENTAGO_TIMEOUT_SECS") {
            config.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("DENTAGO_TIMEOUT_SECS is not a number: {raw:?}"))?;
        }
        if let Some(raw) = lookup("DENTAGO_PAGE_SIZE") {
            config.directory_page_size = raw
                .trim()
                .parse()
                .with_context(|| format!("DENTAGO_PAGE_SIZE is not a number: {raw:?}"))?;
        }
        if let Some(raw) = lookup("DENTAGO_UTC_OFFSET_MINUTES") {
            let minutes: i32 = raw
                .trim()
                .parse()
                .with_context(|| format!("DENTAGO_UTC_OFFSET_MINUTES is not a number: {raw:?}"))?;
            minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .with_context(|| format!("UTC offset out of range: {minutes} minutes"))?;
            config.clinic_utc_offset_minutes = minutes;
        }

        Ok(config)
    }

    /// Clinic offset; UTC if the configured value is out of range.
    pub fn clinic_offset(&self) -> FixedOffset {
        self.clinic_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}
