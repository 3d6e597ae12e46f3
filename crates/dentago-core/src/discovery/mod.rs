//! Doctor discovery: category filtering and free-text search.
//!
//! Filtering is pure and order-preserving. The category is applied first,
//! then the (trimmed, case-insensitive) search term across name, job title,
//! specialty and clinic name.

mod category;

pub use category::*;

use tracing::debug;

use crate::models::Doctor;

/// Filter doctors by category and search term.
pub fn filter(doctors: &[Doctor], category: Category, search_term: &str) -> Vec<Doctor> {
    let term = search_term.trim().to_lowercase();

    doctors
        .iter()
        .filter(|d| category.matches(d))
        .filter(|d| term.is_empty() || matches_term(d, &term))
        .cloned()
        .collect()
}

/// `term` must already be lowercase and non-empty.
fn matches_term(doctor: &Doctor, term: &str) -> bool {
    [
        Some(doctor.full_name.as_str()),
        doctor.job_title.as_deref(),
        Some(doctor.specialty.as_str()),
        doctor.clinic_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(term))
}

/// Where a chip selection asks the UI to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// The map/nearest-clinics screen
    Nearest,
}

/// Home screen discovery state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryState {
    pub category: Category,
    pub search_term: String,
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a chip tap. `Nearest` leaves the active category untouched.
    pub fn select(&mut self, chip: FilterChip) -> Option<NavigationTarget> {
        match chip {
            FilterChip::Category(category) => {
                debug!(category = %category, "Category selected");
                self.category = category;
                None
            }
            FilterChip::Nearest => Some(NavigationTarget::Nearest),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Back to `all` with an empty term.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether anything would narrow the list.
    pub fn is_filtered(&self) -> bool {
        self.category != Category::All || !self.search_term.trim().is_empty()
    }

    pub fn apply(&self, doctors: &[Doctor]) -> Vec<Doctor> {
        filter(doctors, self.category, &self.search_term)
    }

    /// Header title for the current category.
    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    /// Message for an empty result list.
    pub fn empty_message(&self) -> String {
        let term = self.search_term.trim();
        if term.is_empty() {
            "Hech narsa topilmadi".to_string()
        } else {
            format!("\"{}\" bo'yicha natija topilmadi", term)
        }
    }
}
