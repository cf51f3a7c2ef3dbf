//! Work-experience records and total years-of-experience calculation

use crate::error::{QualifierError, Result};
use chrono::{Local, Month, NaiveDate};
use log::{debug, warn};

/// Average year length used to turn day counts into years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// One employment record as it appears in the resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub title: String,
    pub organization: String,
    pub location: String,
    /// `<Month> <Year>`, e.g. "March 2019"
    pub start_date: String,
    pub end: EntryEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEnd {
    /// Still employed; resolved against the calculator's current date
    Present,
    Date(String),
}

/// Sums the length of every experience entry.
///
/// Overlapping positions are counted in full.
#[derive(Debug, Clone)]
pub struct ExperienceCalculator {
    /// Pinned date for "Present"; the local date at calculation time when unset
    pinned_today: Option<NaiveDate>,
}

impl Default for ExperienceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceCalculator {
    pub fn new() -> Self {
        Self { pinned_today: None }
    }

    /// Use a fixed date for the "Present" sentinel.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            pinned_today: Some(today),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn entry_years(&self, entry: &ExperienceEntry) -> Result<f64> {
        let start = parse_month_year(&entry.start_date)?;
        let end = match &entry.end {
            EntryEnd::Present => self.today(),
            EntryEnd::Date(token) => parse_month_year(token)?,
        };

        let days = (end - start).num_days();
        if days < 0 {
            warn!(
                "Experience entry '{}' at '{}' ends before it starts",
                entry.title, entry.organization
            );
        }

        Ok(days as f64 / DAYS_PER_YEAR)
    }

    pub fn total_years(&self, entries: &[ExperienceEntry]) -> Result<f64> {
        let mut total = 0.0;
        for entry in entries {
            total += self.entry_years(entry)?;
        }

        debug!("Total experience over {} entries: {:.2} years", entries.len(), total);
        Ok(total)
    }
}

/// Parse "January 2020" (or "Jan 2020") into the first day of that month.
pub fn parse_month_year(token: &str) -> Result<NaiveDate> {
    let date_error = |reason: &str| QualifierError::DateParse {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = token.split_whitespace();
    let (month, year) = match (parts.next(), parts.next(), parts.next()) {
        (Some(month), Some(year), None) => (month, year),
        _ => return Err(date_error("expected '<Month> <Year>'")),
    };

    let month: Month = month.parse().map_err(|_| date_error("unknown month name"))?;

    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(date_error("expected a four-digit year"));
    }
    let year: i32 = year.parse().map_err(|_| date_error("expected a four-digit year"))?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .ok_or_else(|| date_error("date out of range"))
}
