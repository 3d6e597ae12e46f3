//! Discovery categories and filter chips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Doctor, Gender};

/// Minimum rating for the "top rated" category.
pub const TOP_RATED_THRESHOLD: f64 = 4.0;

/// Keywords that mark a pediatric dentist.
pub const PEDIATRIC_KEYWORDS: [&str; 3] = ["bolalar stomatologi", "pediatr", "bola"];

/// A single-select discovery category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[default]
    All,
    Female,
    Available24x7,
    TopRated,
    Pediatric,
}

impl Category {
    /// Every category, in chip order.
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Female,
        Category::Available24x7,
        Category::TopRated,
        Category::Pediatric,
    ];

    /// Whether a doctor belongs to this category.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            Category::All => true,
            Category::Female => doctor.gender == Gender::Female,
            Category::Available24x7 => doctor.is_available_24x7,
            Category::TopRated => doctor.rating >= TOP_RATED_THRESHOLD,
            Category::Pediatric => {
                let haystack = format!(
                    "{} {}",
                    doctor.specialty,
                    doctor.job_title.as_deref().unwrap_or_default()
                )
                .to_lowercase();
                PEDIATRIC_KEYWORDS.iter().any(|kw| haystack.contains(kw))
            }
        }
    }

    /// Chip key used by the home screen.
    pub fn key(&self) -> &'static str {
        match self {
            Category::All => "barchasi",
            Category::Female => "ayol",
            Category::Available24x7 => "24_7",
            Category::TopRated => "yaxshi",
            Category::Pediatric => "bola",
        }
    }

    /// List header title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::All => "Barcha shifokorlar",
            Category::Female => "Ayol shifokorlar",
            Category::Available24x7 => "24/7 ishlaydigan shifokorlar",
            Category::TopRated => "Eng yaxshi shifokorlar",
            Category::Pediatric => "Bolalar shifokorlari",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for an unrecognized category or chip key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "barchasi" | "all" => Ok(Category::All),
            "ayol" | "female" => Ok(Category::Female),
            "24_7" | "available24x7" => Ok(Category::Available24x7),
            "yaxshi" | "toprated" => Ok(Category::TopRated),
            "bola" | "pediatric" => Ok(Category::Pediatric),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A chip on the home screen. `Nearest` navigates instead of filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChip {
    Category(Category),
    Nearest,
}

impl FilterChip {
    pub fn key(&self) -> &'static str {
        match self {
            FilterChip::Category(c) => c.key(),
            FilterChip::Nearest => "yaqin",
        }
    }
}

impl FromStr for FilterChip {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yaqin" | "nearest" => Ok(FilterChip::Nearest),
            other => other.parse().map(FilterChip::Category),
        }
    }
}
