//! Aggregation of per-page outcomes into a scan-level result.
//!
//! Totals are plain sums, so the result does not depend on page order. The
//! compliance score is `round_half_up(100 * passed / (passed + failed))`;
//! when both counters are zero the score is undefined and callers pick a
//! fallback instead of propagating a non-number.

use crate::error::{AggregateError, ScoreError};
use crate::models::{PageResult, ScanOptions, ScanResult};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Score reported when a scan has no passed or failed checks.
pub const DEFAULT_SCORE_FALLBACK: u8 = 100;

/// Integer percentage of passed over passed+failed, rounded half-up.
pub fn compliance_score(passed: usize, failed: usize) -> Result<u8, ScoreError> {
    let total = passed as u128 + failed as u128;
    if total == 0 {
        return Err(ScoreError::DivisionByZero);
    }
    // (200p + t) / 2t == floor(100p/t + 1/2)
    let pct = (200 * passed as u128 + total) / (2 * total);
    Ok(pct as u8)
}

impl PageResult {
    pub fn score(&self) -> Result<u8, ScoreError> {
        compliance_score(self.passed_count, self.failed_count)
    }

    pub fn score_or(&self, fallback: u8) -> u8 {
        self.score().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Summed counters across pages.
pub struct Totals {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl Totals {
    /// Sum page counters; fails instead of wrapping when a total overflows.
    pub fn of(pages: &[PageResult]) -> Result<Totals, AggregateError> {
        pages.iter().try_fold(Totals::default(), |acc, p| {
            let overflow = |counter: &str| AggregateError::CounterOverflow {
                url: p.url.clone(),
                counter: counter.to_string(),
            };
            Ok(Totals {
                passed: acc
                    .passed
                    .checked_add(p.passed_count)
                    .ok_or_else(|| overflow("passedCount"))?,
                failed: acc
                    .failed
                    .checked_add(p.failed_count)
                    .ok_or_else(|| overflow("failedCount"))?,
                warnings: acc
                    .warnings
                    .checked_add(p.warning_count)
                    .ok_or_else(|| overflow("warningCount"))?,
            })
        })
    }

    pub fn score(&self) -> Result<u8, ScoreError> {
        compliance_score(self.passed, self.failed)
    }
}

/// Inputs describing the scan invocation the pages belong to.
#[derive(Debug, Clone)]
pub struct ScanMeta {
    pub target_url: String,
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    pub options: ScanOptions,
    pub score_fallback: u8,
}

impl ScanMeta {
    pub fn new(target_url: impl Into<String>) -> Self {
        ScanMeta {
            target_url: target_url.into(),
            timestamp: Utc::now(),
            duration_seconds: 0.0,
            options: ScanOptions::default(),
            score_fallback: DEFAULT_SCORE_FALLBACK,
        }
    }
}

/// Combine a non-empty page list into a `ScanResult`.
///
/// Every page is checked for counter/issue consistency first.
pub fn aggregate(pages: Vec<PageResult>, meta: ScanMeta) -> Result<ScanResult, AggregateError> {
    if pages.is_empty() {
        return Err(AggregateError::NoPages);
    }
    for page in &pages {
        page.validate()?;
    }
    let totals = Totals::of(&pages)?;
    let compliance_score = match totals.score() {
        Ok(s) => s,
        Err(ScoreError::DivisionByZero) => {
            debug!(fallback = meta.score_fallback, "no scored checks; using fallback score");
            meta.score_fallback
        }
    };
    debug!(
        pages = pages.len(),
        passed = totals.passed,
        failed = totals.failed,
        warnings = totals.warnings,
        score = compliance_score,
        "aggregated scan result"
    );
    Ok(ScanResult {
        target_url: meta.target_url,
        timestamp: meta.timestamp,
        pages,
        total_passed: totals.passed,
        total_failed: totals.failed,
        total_warnings: totals.warnings,
        duration_seconds: meta.duration_seconds,
        compliance_score,
        standards: meta.options.standards,
        full_domain: meta.options.full_domain,
    })
}
