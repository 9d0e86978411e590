//! Core domain types for the job carousel feed.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// One normalized job posting, ready for display.
///
/// Every field is plain display text. `title` and `company` are never empty
/// for jobs produced by the normalizer; `link`, `benefits` and
/// `qualifications` may be empty, everything else carries a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: String,
    pub company: String,
    pub location: String,
    pub pay_range: String,
    pub employment_type: String,
    pub inspection_type: String,
    /// Absolute URL, or empty when the posting link is missing or invalid.
    pub link: String,
    pub description: String,
    /// Display string as written in the sheet (e.g. `2 days ago`).
    pub posted_date: String,
    pub source: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub qualifications: String,
}

impl Job {
    /// Whether the posting has a navigable link.
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }

    /// Icon class for this job's inspection type.
    pub fn icon(&self) -> &'static str {
        icon_for(&self.inspection_type)
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.title, self.company)
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Icon used when the inspection type is not in [`INSPECTION_ICONS`].
pub const DEFAULT_ICON: &str = "fas fa-briefcase";

/// Known inspection types and their icon classes.
pub const INSPECTION_ICONS: &[(&str, &str)] = &[
    ("Property Inspection", "fas fa-home"),
    ("Insurance Inspection", "fas fa-shield-alt"),
    ("Mortgage Inspection", "fas fa-university"),
    ("Government Inspection", "fas fa-flag-usa"),
    ("USDA/Government Inspection", "fas fa-flag-usa"),
    ("Building/Structural Inspection", "fas fa-building"),
    ("Mystery Shopping", "fas fa-shopping-cart"),
    ("General Inspection", "fas fa-search"),
    ("General Field Inspection", "fas fa-search"),
    ("Due Diligence Inspection", "fas fa-clipboard-check"),
    ("Loss Control Audit", "fas fa-shield-alt"),
    ("Property Appraisal", "fas fa-calculator"),
    ("Notary Services", "fas fa-stamp"),
    ("Occupancy Verification", "fas fa-key"),
    ("Property Preservation", "fas fa-tools"),
];

/// Map an inspection type to its icon class (exact match).
pub fn icon_for(inspection_type: &str) -> &'static str {
    INSPECTION_ICONS
        .iter()
        .find(|(name, _)| *name == inspection_type)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
