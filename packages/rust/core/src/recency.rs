//! Posted-date resolution, recency filtering and ranking.
//!
//! Sheet dates are free text: relative phrases (`2 days ago`), timestamps
//! from form submissions (`3/14/2026 9:05:00`), ISO dates, or nothing at
//! all. [`parse_posted_at`] turns what it can into an instant;
//! [`rank_by_recency`] keeps the recent ones, newest first.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use jobcarousel_shared::{AppConfig, Job, UndatedPolicy};
use regex::Regex;
use tracing::debug;

/// Matches `<N> day(s) ago` / `<N> hour(s) ago`, case-insensitive.
static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(day|hour)s?\s+ago\b").expect("relative date regex")
});

/// Date-and-time layouts tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts tried in order (midnight UTC).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Window, cap and undated handling for [`rank_by_recency`].
#[derive(Debug, Clone)]
pub struct RecencyOptions {
    /// Trailing window; older postings are dropped.
    pub window: TimeDelta,
    /// Maximum number of jobs kept after sorting.
    pub max_results: usize,
    /// What to do with dates that can't be parsed.
    pub undated: UndatedPolicy,
}

impl From<&AppConfig> for RecencyOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            window: TimeDelta::days(i64::from(config.ingest.window_days)),
            max_results: config.ingest.max_results,
            undated: config.ingest.undated,
        }
    }
}

impl Default for RecencyOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Date resolution
// ---------------------------------------------------------------------------

/// Parse a posted-date display string into an instant, relative to `now`.
///
/// Returns `None` for empty or unrecognized text.
pub fn parse_posted_at(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = RELATIVE_RE.captures(text) {
        // Absurdly large offsets, even ones past i64, are simply "very old".
        let Ok(amount) = caps[1].parse::<i64>() else {
            return Some(DateTime::<Utc>::MIN_UTC);
        };
        let delta = if caps[2].eq_ignore_ascii_case("day") {
            TimeDelta::try_days(amount)
        } else {
            TimeDelta::try_hours(amount)
        };
        return Some(
            delta
                .and_then(|d| now.checked_sub_signed(d))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        );
    }

    parse_absolute(text)
}

fn parse_absolute(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Resolve a posted date under `policy`.
///
/// `None` means the job should not appear in the feed at all.
pub fn resolve_posted_at(
    text: &str,
    now: DateTime<Utc>,
    policy: UndatedPolicy,
) -> Option<DateTime<Utc>> {
    match parse_posted_at(text, now) {
        Some(at) => Some(at),
        None => match policy {
            UndatedPolicy::TreatAsNow => Some(now),
            UndatedPolicy::Exclude => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Keep jobs posted within the window, newest first, capped at `max_results`.
///
/// The sort is stable: jobs with equal instants keep their sheet order.
pub fn rank_by_recency(jobs: Vec<Job>, now: DateTime<Utc>, opts: &RecencyOptions) -> Vec<Job> {
    let cutoff = now.checked_sub_signed(opts.window).unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut dated: Vec<(DateTime<Utc>, Job)> = jobs
        .into_iter()
        .filter_map(|job| {
            let Some(at) = resolve_posted_at(&job.posted_date, now, opts.undated) else {
                debug!(job = %job, posted = %job.posted_date, "dropping undated job");
                return None;
            };
            if at < cutoff {
                debug!(job = %job, posted = %job.posted_date, "dropping stale job");
                return None;
            }
            Some((at, job))
        })
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(opts.max_results);

    dated.into_iter().map(|(_, job)| job).collect()
}
