//! Accessibility standards a scan can be run against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// WCAG conformance level. Ordered so that `A < AA < AAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A,
    AA,
    AAA,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::A => "A",
            Level::AA => "AA",
            Level::AAA => "AAA",
        };
        f.write_str(s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StandardId {
    Wcag2a,
    Wcag2aa,
    Wcag2aaa,
    Wcag21aa,
    Section508,
}

impl StandardId {
    pub const ALL: [StandardId; 5] = [
        StandardId::Wcag2a,
        StandardId::Wcag2aa,
        StandardId::Wcag2aaa,
        StandardId::Wcag21aa,
        StandardId::Section508,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StandardId::Wcag2a => "wcag2a",
            StandardId::Wcag2aa => "wcag2aa",
            StandardId::Wcag2aaa => "wcag2aaa",
            StandardId::Wcag21aa => "wcag21aa",
            StandardId::Section508 => "section508",
        }
    }

    /// Highest conformance level whose rules this standard includes.
    /// Section 508 incorporates WCAG 2.0 AA by reference.
    pub fn max_level(&self) -> Level {
        match self {
            StandardId::Wcag2a => Level::A,
            StandardId::Wcag2aa | StandardId::Wcag21aa | StandardId::Section508 => Level::AA,
            StandardId::Wcag2aaa => Level::AAA,
        }
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['.', '-', '_', ' '], "");
        StandardId::ALL
            .into_iter()
            .find(|id| id.as_str() == norm)
            .ok_or_else(|| format!("unknown standard '{}'", s))
    }
}

/// Options passed alongside the URL when a scan is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    pub full_domain: bool,
    pub standards: BTreeSet<StandardId>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            full_domain: false,
            standards: BTreeSet::from([StandardId::Wcag2aa]),
        }
    }
}

impl ScanOptions {
    /// Highest level covered by any selected standard, `None` when empty.
    pub fn max_level(&self) -> Option<Level> {
        self.standards.iter().map(StandardId::max_level).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_is_lenient_about_punctuation() {
        assert_eq!("WCAG2AA".parse::<StandardId>(), Ok(StandardId::Wcag2aa));
        assert_eq!("wcag-2.1-aa".parse::<StandardId>(), Ok(StandardId::Wcag21aa));
        assert_eq!("Section 508".parse::<StandardId>(), Ok(StandardId::Section508));
        assert!("wcag3".parse::<StandardId>().is_err());
    }

    #[test]
    fn test_max_level_takes_strictest_selected_standard() {
        let mut opts = ScanOptions::default();
        assert_eq!(opts.max_level(), Some(Level::AA));
        opts.standards.insert(StandardId::Wcag2aaa);
        assert_eq!(opts.max_level(), Some(Level::AAA));
        opts.standards.clear();
        assert_eq!(opts.max_level(), None);
    }
}
