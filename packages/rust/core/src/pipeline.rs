//! End-to-end ingestion: fetch → tokenize → map header → normalize → rank.
//!
//! The network step lives in [`load_feed`]; everything after it is the pure
//! [`resolve_feed`], so a fetch result (or a local file) always turns into a
//! displayable [`JobFeed`]. Failures never escape: they become the sample
//! feed with a reason attached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use jobcarousel_sheet::{JobField, SchemaMapping, split_lines, tokenize_line};
use jobcarousel_shared::{AppConfig, Job, JobCarouselError, Result};
use jobcarousel_source::{FetchOptions, fetch_csv};

use crate::normalize::{NormalizeOptions, normalize_row};
use crate::recency::{RecencyOptions, rank_by_recency};
use crate::sample::sample_jobs;

// ---------------------------------------------------------------------------
// Options & results
// ---------------------------------------------------------------------------

/// Configuration for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Maximum number of data lines looked at.
    pub max_rows_scanned: usize,
    /// Rows with fewer cells are skipped before normalization.
    pub min_row_width: usize,
    /// Per-row normalization settings.
    pub normalize: NormalizeOptions,
    /// Window, cap and undated handling.
    pub recency: RecencyOptions,
}

impl From<&AppConfig> for IngestOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_rows_scanned: config.ingest.max_rows_scanned,
            min_row_width: config.ingest.min_row_width,
            normalize: NormalizeOptions::from(config),
            recency: RecencyOptions::from(config),
        }
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Row counts for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Data lines looked at (bounded by `max_rows_scanned`).
    pub lines_scanned: usize,
    /// Lines too narrow or with an empty first cell.
    pub skipped: usize,
    /// Lines the normalizer rejected (no title or company).
    pub rejected: usize,
    /// Jobs produced by the normalizer.
    pub normalized: usize,
    /// Jobs left after the recency window and cap.
    pub ranked: usize,
}

/// Where a feed's jobs came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FeedOrigin {
    /// Parsed from the live sheet.
    Live,
    /// The embedded sample jobs, because the live sheet was unusable.
    Sample { reason: String },
}

/// The ordered job list handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct JobFeed {
    pub jobs: Vec<Job>,
    pub origin: FeedOrigin,
    /// Present when the CSV got as far as row processing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IngestStats>,
}

impl JobFeed {
    /// A feed made of the sample jobs.
    pub fn sample(reason: impl Into<String>) -> Self {
        Self {
            jobs: sample_jobs(),
            origin: FeedOrigin::Sample {
                reason: reason.into(),
            },
            stats: None,
        }
    }

    /// Number of jobs in the feed.
    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the live sheet was replaced by sample data.
    pub fn is_sample(&self) -> bool {
        matches!(self.origin, FeedOrigin::Sample { .. })
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Fetch the sheet and turn it into a feed. Never fails.
#[instrument(skip_all, fields(url = %fetch.url))]
pub async fn load_feed(fetch: &FetchOptions, opts: &IngestOptions) -> JobFeed {
    let fetched = fetch_csv(fetch).await.map(|csv| csv.body);
    resolve_feed(fetched, Utc::now(), opts)
}

/// Turn a fetch result into a feed, falling back to samples on any failure
/// or when nothing survives filtering.
pub fn resolve_feed(fetched: Result<String>, now: DateTime<Utc>, opts: &IngestOptions) -> JobFeed {
    let text = match fetched {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, transport = e.is_transport(), "source unusable, using sample jobs");
            return JobFeed::sample(e.to_string());
        }
    };

    match parse_jobs(&text, now, opts) {
        Ok((jobs, stats)) if jobs.is_empty() => {
            warn!(?stats, "no jobs survived ingestion, using sample jobs");
            JobFeed {
                stats: Some(stats),
                ..JobFeed::sample("no recent jobs in sheet")
            }
        }
        Ok((jobs, stats)) => {
            info!(jobs = jobs.len(), "live feed ready");
            JobFeed {
                jobs,
                origin: FeedOrigin::Live,
                stats: Some(stats),
            }
        }
        Err(e) => {
            warn!(error = %e, "CSV unusable, using sample jobs");
            JobFeed::sample(e.to_string())
        }
    }
}

/// Parse CSV text into ranked jobs.
///
/// Fails only when the document has no data rows. Bad rows are skipped and
/// counted in [`IngestStats`].
pub fn parse_jobs(
    text: &str,
    now: DateTime<Utc>,
    opts: &IngestOptions,
) -> Result<(Vec<Job>, IngestStats)> {
    let lines = split_lines(text);
    info!(lines = lines.len(), "processing CSV lines");

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(JobCarouselError::parse("CSV is empty"));
    };
    if data_lines.is_empty() {
        return Err(JobCarouselError::parse("CSV has no data rows"));
    }

    let mapping = SchemaMapping::from_header(&tokenize_line(header_line));
    debug!(columns = mapping.header_width(), "header mapped");
    let unmapped = mapping.unmapped();
    if unmapped.contains(&JobField::Title) || unmapped.contains(&JobField::Company) {
        warn!(?unmapped, "header lacks a title or company column, every row will be rejected");
    } else if !unmapped.is_empty() {
        debug!(?unmapped, "header has no column for some fields, defaults apply");
    }

    let mut stats = IngestStats::default();
    let mut jobs = Vec::new();

    for (i, line) in data_lines.iter().take(opts.max_rows_scanned).enumerate() {
        stats.lines_scanned += 1;
        let row_number = i + 1;
        let cells = tokenize_line(line);

        if cells.len() < opts.min_row_width || cells[0].is_empty() {
            debug!(
                row = row_number,
                cells = cells.len(),
                header = mapping.header_width(),
                "skipping narrow or blank row"
            );
            stats.skipped += 1;
            continue;
        }

        match normalize_row(&cells, &mapping, &opts.normalize) {
            Some(job) => jobs.push(job),
            None => {
                debug!(row = row_number, "skipping row without title or company");
                stats.rejected += 1;
            }
        }
    }

    if data_lines.len() > opts.max_rows_scanned {
        debug!(
            total = data_lines.len(),
            scanned = opts.max_rows_scanned,
            "row scan cap reached"
        );
    }

    stats.normalized = jobs.len();
    let ranked = rank_by_recency(jobs, now, &opts.recency);
    stats.ranked = ranked.len();

    info!(
        scanned = stats.lines_scanned,
        normalized = stats.normalized,
        ranked = stats.ranked,
        "CSV parsed"
    );

    Ok((ranked, stats))
}
