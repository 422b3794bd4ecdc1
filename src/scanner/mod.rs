//! Scan trigger: turns a URL plus options into a `ScanResult`.

pub mod fixtures;

use crate::aggregate::{aggregate, ScanMeta};
use crate::error::ScanError;
use crate::models::{Level, PageResult, ScanOptions, ScanResult};
use crate::rules::RuleCode;
use crate::validate::validate_url;
use chrono::Utc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Something that can scan a URL. A call completes exactly once with the
/// whole result; there are no partial results.
pub trait Scanner {
    fn perform_scan(&self, url: &str, options: &ScanOptions) -> Result<ScanResult, ScanError>;
}

/// Scanner backed by fixture data instead of a real engine.
#[derive(Debug, Clone)]
pub struct FixtureScanner {
    pub seed: Option<u64>,
    pub delay: Duration,
    pub score_fallback: u8,
}

impl Default for FixtureScanner {
    fn default() -> Self {
        FixtureScanner {
            seed: None,
            delay: Duration::ZERO,
            score_fallback: crate::aggregate::DEFAULT_SCORE_FALLBACK,
        }
    }
}

impl Scanner for FixtureScanner {
    fn perform_scan(&self, url: &str, options: &ScanOptions) -> Result<ScanResult, ScanError> {
        let target = validate_url(url)?;
        let max_level = options.max_level().ok_or(ScanError::NoStandards)?;
        info!(url = %target, full_domain = options.full_domain, "starting scan");

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let pages = if options.full_domain {
            let seed = self.seed.unwrap_or_else(rand::random);
            info!(seed, "generating domain-wide fixture pages");
            fixtures::domain_pages(&target, seed)
        } else {
            vec![fixtures::single_page(&target)]
        };
        let pages: Vec<PageResult> = pages
            .into_iter()
            .map(|p| restrict_to_level(p, max_level))
            .collect();

        let load_time: f64 = pages.iter().map(|p| p.load_time_seconds).sum();
        let duration = load_time + self.delay.as_secs_f64();
        let meta = ScanMeta {
            target_url: target.to_string(),
            timestamp: Utc::now(),
            duration_seconds: (duration * 100.0).round() / 100.0,
            options: options.clone(),
            score_fallback: self.score_fallback,
        };
        let result = aggregate(pages, meta)?;
        info!(
            pages = result.pages.len(),
            score = result.compliance_score,
            "scan finished"
        );
        Ok(result)
    }
}

/// Drop findings for rules above the selected conformance level.
/// Unknown rule codes are kept.
fn restrict_to_level(page: PageResult, max: Level) -> PageResult {
    let before = page.issues.len();
    let issues: Vec<_> = page
        .issues
        .into_iter()
        .filter(|is| RuleCode::from_code(&is.rule_code).map_or(true, |r| r.level() <= max))
        .collect();
    if issues.len() != before {
        debug!(
            url = %page.url,
            dropped = before - issues.len(),
            level = %max,
            "filtered issues by level"
        );
    }
    PageResult::new(
        page.url,
        page.title,
        issues,
        page.passed_count,
        page.load_time_seconds,
        page.status_code,
    )
}
