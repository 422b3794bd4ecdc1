//! Scan session state as an immutable value transitioned by events.
//!
//! The flow is `Idle -> Scanning -> Done`. While a scan is running every
//! input event is refused; a started scan always ends in `Complete` or
//! `Fail` since cancellation is not supported.

use crate::error::TransitionError;
use crate::models::{ScanOptions, ScanResult, StandardId};
use crate::validate::validate_url;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Scanning { target: String },
    Done(Box<ScanResult>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EditUrl(String),
    ToggleFullDomain,
    SetStandards(BTreeSet<StandardId>),
    Submit,
    Complete(ScanResult),
    Fail(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub url: String,
    pub full_domain: bool,
    pub standards: BTreeSet<StandardId>,
    pub phase: Phase,
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let opts = ScanOptions::default();
        AppState {
            url: String::new(),
            full_domain: opts.full_domain,
            standards: opts.standards,
            phase: Phase::Idle,
            last_error: None,
        }
    }
}

impl AppState {
    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, Phase::Scanning { .. })
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match &self.phase {
            Phase::Done(r) => Some(r),
            _ => None,
        }
    }

    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            full_domain: self.full_domain,
            standards: self.standards.clone(),
        }
    }

    /// Produce the state that follows `event`, leaving `self` untouched.
    pub fn apply(&self, event: Event) -> Result<AppState, TransitionError> {
        let mut next = self.clone();
        match (event, &self.phase) {
            (Event::Complete(result), Phase::Scanning { .. }) => {
                next.phase = Phase::Done(Box::new(result));
            }
            (Event::Fail(msg), Phase::Scanning { .. }) => {
                next.phase = Phase::Idle;
                next.last_error = Some(msg);
            }
            (Event::Complete(_) | Event::Fail(_), _) => return Err(TransitionError::NotScanning),
            (_, Phase::Scanning { .. }) => return Err(TransitionError::ScanInProgress),
            (Event::EditUrl(url), _) => next.url = url,
            (Event::ToggleFullDomain, _) => next.full_domain = !self.full_domain,
            (Event::SetStandards(standards), _) => next.standards = standards,
            (Event::Submit, _) => {
                let target = validate_url(&self.url)?;
                next.phase = Phase::Scanning {
                    target: target.to_string(),
                };
                next.last_error = None;
            }
            (Event::Reset, _) => {
                next.phase = Phase::Idle;
                next.last_error = None;
            }
        }
        debug!(from = ?phase_name(&self.phase), to = ?phase_name(&next.phase), "state transition");
        Ok(next)
    }
}

fn phase_name(p: &Phase) -> &'static str {
    match p {
        Phase::Idle => "idle",
        Phase::Scanning { .. } => "scanning",
        Phase::Done(_) => "done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, ScanMeta};
    use crate::error::ValidationError;
    use crate::models::PageResult;

    fn result() -> ScanResult {
        aggregate(
            vec![PageResult::new("https://example.com/", "Home", vec![], 5, 0.2, 200)],
            ScanMeta::new("https://example.com/"),
        )
        .unwrap()
    }

    fn scanning() -> AppState {
        AppState::default()
            .apply(Event::EditUrl("example.com".into()))
            .unwrap()
            .apply(Event::Submit)
            .unwrap()
    }

    #[test]
    fn test_submit_complete_reset_cycle() {
        let s = scanning();
        assert_eq!(
            s.phase,
            Phase::Scanning {
                target: "https://example.com/".into()
            }
        );
        let done = s.apply(Event::Complete(result())).unwrap();
        assert_eq!(done.result().map(|r| r.total_passed), Some(5));
        let idle = done.apply(Event::Reset).unwrap();
        assert_eq!(idle.phase, Phase::Idle);
        assert_eq!(idle.url, "example.com");
    }

    #[test]
    fn test_second_submit_while_scanning_is_refused() {
        let s = scanning();
        assert_eq!(s.apply(Event::Submit), Err(TransitionError::ScanInProgress));
        assert_eq!(s.apply(Event::ToggleFullDomain), Err(TransitionError::ScanInProgress));
        assert_eq!(s.apply(Event::Reset), Err(TransitionError::ScanInProgress));
    }

    #[test]
    fn test_invalid_url_never_reaches_scanning() {
        let s = AppState::default().apply(Event::EditUrl("ftp://x".into())).unwrap();
        let err = s.apply(Event::Submit).unwrap_err();
        assert!(matches!(
            err,
            TransitionError::InvalidUrl(ValidationError::UnsupportedScheme(_))
        ));
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn test_resubmit_discards_previous_result() {
        let done = scanning().apply(Event::Complete(result())).unwrap();
        let again = done.apply(Event::Submit).unwrap();
        assert!(again.is_scanning());
        assert!(again.result().is_none());
    }

    #[test]
    fn test_fail_returns_to_idle_with_error() {
        let s = scanning().apply(Event::Fail("boom".into())).unwrap();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.last_error.as_deref(), Some("boom"));
        assert_eq!(
            AppState::default().apply(Event::Complete(result())),
            Err(TransitionError::NotScanning)
        );
    }

    #[test]
    fn test_toggles_feed_scan_options() {
        let s = AppState::default()
            .apply(Event::ToggleFullDomain)
            .unwrap()
            .apply(Event::SetStandards(BTreeSet::from([StandardId::Section508])))
            .unwrap();
        let opts = s.options();
        assert!(opts.full_domain);
        assert!(opts.standards.contains(&StandardId::Section508));
    }
}
