//! Shared data models for scan findings, per-page outcomes and scan results.

pub mod standard;

use crate::error::AggregateError;
use crate::rules::RuleCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use standard::{Level, ScanOptions, StandardId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum IssueKind {
    Error,
    Warning,
}

impl IssueKind {
    /// Parse a severity label as found in scanner output (`error|warning|warn`).
    pub fn parse(s: &str) -> Option<IssueKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Some(IssueKind::Error),
            "warning" | "warn" => Some(IssueKind::Warning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Error => "error",
            IssueKind::Warning => "warning",
        }
    }
}

impl TryFrom<String> for IssueKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, <IssueKind as TryFrom<String>>::Error> {
        IssueKind::parse(&s).ok_or_else(|| format!("unknown issue kind '{}'", s))
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single accessibility finding with severity, rule code and location.
pub struct Issue {
    pub kind: IssueKind,
    pub rule_code: String,
    pub message: String,
    pub selector: String,
    pub context: String,
}

impl Issue {
    pub fn new(
        kind: IssueKind,
        rule_code: impl Into<String>,
        message: impl Into<String>,
        selector: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Issue {
            kind,
            rule_code: rule_code.into(),
            message: message.into(),
            selector: selector.into(),
            context: context.into(),
        }
    }

    /// Build an issue for a known rule, classified with the rule's default kind.
    pub fn from_rule(
        rule: RuleCode,
        selector: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Issue::new(rule.default_kind(), rule.code(), rule.summary(), selector, context)
    }

    /// WCAG success criterion (e.g. `1.4.3`) encoded in the rule code, if any.
    pub fn criterion(&self) -> Option<String> {
        crate::rules::criterion_of(&self.rule_code)
    }

    pub fn remediation(&self) -> &'static str {
        crate::rules::remediation_example(&self.rule_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-URL scan outcome bundling issues and counters.
pub struct PageResult {
    pub url: String,
    pub title: String,
    pub issues: Vec<Issue>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub warning_count: usize,
    pub load_time_seconds: f64,
    pub status_code: u16,
}

impl PageResult {
    /// Build a page whose failed/warning counters are derived from `issues`.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        issues: Vec<Issue>,
        passed_count: usize,
        load_time_seconds: f64,
        status_code: u16,
    ) -> Self {
        let (failed_count, warning_count) = count_kinds(&issues);
        PageResult {
            url: url.into(),
            title: title.into(),
            issues,
            passed_count,
            failed_count,
            warning_count,
            load_time_seconds,
            status_code,
        }
    }

    /// Check that the counters agree with the classified issues.
    pub fn validate(&self) -> Result<(), AggregateError> {
        let (errors, warnings) = count_kinds(&self.issues);
        if errors != self.failed_count || warnings != self.warning_count {
            return Err(AggregateError::InconsistentPage {
                url: self.url.clone(),
                detail: format!(
                    "failedCount={} warningCount={} but issues have {} errors and {} warnings",
                    self.failed_count, self.warning_count, errors, warnings
                ),
            });
        }
        Ok(())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Warning)
    }
}

fn count_kinds(issues: &[Issue]) -> (usize, usize) {
    issues.iter().fold((0, 0), |(e, w), is| match is.kind {
        IssueKind::Error => (e + 1, w),
        IssueKind::Warning => (e, w + 1),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Aggregate outcome across one or more pages for one scan invocation.
pub struct ScanResult {
    pub target_url: String,
    pub timestamp: DateTime<Utc>,
    pub pages: Vec<PageResult>,
    pub total_passed: usize,
    pub total_failed: usize,
    pub total_warnings: usize,
    pub duration_seconds: f64,
    pub compliance_score: u8,
    #[serde(default)]
    pub standards: BTreeSet<StandardId>,
    #[serde(default)]
    pub full_domain: bool,
}
