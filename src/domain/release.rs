//! A published version and its release date

use super::{Clock, Version};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days per libyear
pub const DAYS_PER_YEAR: f64 = 365.0;

/// An immutable release fact: which version, when, and whether it is listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Released version
    pub version: Version,
    /// Publication date (day granularity)
    pub date: NaiveDate,
    /// Whether the release is listed in its registry (not yanked/deprecated)
    #[serde(rename = "published")]
    pub is_published: bool,
}

impl Release {
    /// Creates a new release
    pub fn new(version: Version, date: NaiveDate, is_published: bool) -> Self {
        Self {
            version,
            date,
            is_published,
        }
    }

    /// Creates a release from a registry timestamp
    ///
    /// Only the date part is kept. A missing timestamp becomes the Unix epoch.
    pub fn from_timestamp(
        version: Version,
        published_at: Option<DateTime<Utc>>,
        is_published: bool,
    ) -> Self {
        let date = published_at
            .map(|ts| ts.date_naive())
            .unwrap_or_else(unknown_date);
        Self::new(version, date, is_published)
    }

    /// Creates a release whose publication date is unknown
    pub fn undated(version: Version) -> Self {
        Self::new(version, unknown_date(), false)
    }

    /// Returns false when the date is the unknown-date placeholder
    pub fn has_known_date(&self) -> bool {
        self.date != unknown_date()
    }

    /// Age of this release in years, never negative
    ///
    /// A release dated today or in the future has a pulse of 0.
    pub fn pulse(&self, clock: &dyn Clock) -> f64 {
        let days = (clock.today() - self.date).num_days().max(0);
        days as f64 / DAYS_PER_YEAR
    }
}

/// Placeholder date used when a registry has no publication time
pub fn unknown_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}
