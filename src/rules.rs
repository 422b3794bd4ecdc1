//! Known accessibility rule codes and their remediation examples.
//!
//! Rule codes follow the HTML_CodeSniffer naming used by common scanners:
//! `WCAG2AA.Principle1.Guideline1_1.1_1_1.H37`, i.e. a standard prefix,
//! principle, guideline, success criterion and technique path. The set of
//! codes this crate knows is closed (`RuleCode`); anything else resolves to
//! `FALLBACK_REMEDIATION`.

use crate::models::{IssueKind, Level};
use regex::Regex;
use std::sync::OnceLock;

/// Remediation text returned for rule codes outside the known set.
pub const FALLBACK_REMEDIATION: &str =
    "Review this element against the referenced WCAG success criterion and its techniques.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleCode {
    ImageAlt,
    FormLabel,
    HeadingStructure,
    ContrastMinimum,
    ContrastEnhanced,
    PageTitle,
    LinkPurpose,
    FocusVisible,
    HtmlLang,
    DuplicateId,
    ButtonName,
}

impl RuleCode {
    pub const ALL: [RuleCode; 11] = [
        RuleCode::ImageAlt,
        RuleCode::FormLabel,
        RuleCode::HeadingStructure,
        RuleCode::ContrastMinimum,
        RuleCode::ContrastEnhanced,
        RuleCode::PageTitle,
        RuleCode::LinkPurpose,
        RuleCode::FocusVisible,
        RuleCode::HtmlLang,
        RuleCode::DuplicateId,
        RuleCode::ButtonName,
    ];

    /// Principle/guideline segment preceding the technique path.
    fn guideline(&self) -> &'static str {
        match self {
            RuleCode::ImageAlt => "Principle1.Guideline1_1",
            RuleCode::FormLabel | RuleCode::HeadingStructure => "Principle1.Guideline1_3",
            RuleCode::ContrastMinimum | RuleCode::ContrastEnhanced => "Principle1.Guideline1_4",
            RuleCode::PageTitle | RuleCode::LinkPurpose | RuleCode::FocusVisible => {
                "Principle2.Guideline2_4"
            }
            RuleCode::HtmlLang => "Principle3.Guideline3_1",
            RuleCode::DuplicateId | RuleCode::ButtonName => "Principle4.Guideline4_1",
        }
    }

    /// Success criterion and technique, e.g. `1_1_1.H37`.
    pub fn path(&self) -> &'static str {
        match self {
            RuleCode::ImageAlt => "1_1_1.H37",
            RuleCode::FormLabel => "1_3_1.F68",
            RuleCode::HeadingStructure => "1_3_1.H42",
            RuleCode::ContrastMinimum => "1_4_3.G18.Fail",
            RuleCode::ContrastEnhanced => "1_4_6.G17.Fail",
            RuleCode::PageTitle => "2_4_2.H25.1.NoTitleEl",
            RuleCode::LinkPurpose => "2_4_4.H77,H78,H79,H80,H81",
            RuleCode::FocusVisible => "2_4_7.G149,G165,G195,C15,SCR31",
            RuleCode::HtmlLang => "3_1_1.H57.2",
            RuleCode::DuplicateId => "4_1_1.F77",
            RuleCode::ButtonName => "4_1_2.H91.Button.Name",
        }
    }

    /// Full rule code with the narrowest standard prefix that includes it.
    pub fn code(&self) -> String {
        let prefix = match self.level() {
            Level::AAA => "WCAG2AAA",
            Level::A | Level::AA => "WCAG2AA",
        };
        format!("{}.{}.{}", prefix, self.guideline(), self.path())
    }

    pub fn level(&self) -> Level {
        match self {
            RuleCode::ContrastMinimum | RuleCode::FocusVisible => Level::AA,
            RuleCode::ContrastEnhanced => Level::AAA,
            _ => Level::A,
        }
    }

    /// Kind a finding for this rule is reported as.
    pub fn default_kind(&self) -> IssueKind {
        match self {
            RuleCode::HeadingStructure
            | RuleCode::LinkPurpose
            | RuleCode::FocusVisible
            | RuleCode::ContrastEnhanced => IssueKind::Warning,
            _ => IssueKind::Error,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            RuleCode::ImageAlt => {
                "Img element missing an alt attribute. Use the alt attribute to specify a short \
                 text alternative."
            }
            RuleCode::FormLabel => {
                "This form field should be labelled in some way. Use the label element or \
                 aria-label."
            }
            RuleCode::HeadingStructure => {
                "Heading markup should be used if this content is intended as a heading."
            }
            RuleCode::ContrastMinimum => {
                "This element has insufficient contrast at this conformance level. Expected a \
                 contrast ratio of at least 4.5:1."
            }
            RuleCode::ContrastEnhanced => {
                "This element has insufficient contrast at this conformance level. Expected a \
                 contrast ratio of at least 7:1."
            }
            RuleCode::PageTitle => {
                "A title should be provided for the document, using a non-empty title element in \
                 the head section."
            }
            RuleCode::LinkPurpose => {
                "Anchor element found with a valid href attribute, but no link content has been \
                 supplied."
            }
            RuleCode::FocusVisible => {
                "Check that there is at least one mode of operation where the keyboard focus \
                 indicator can be visually located."
            }
            RuleCode::HtmlLang => {
                "The html element should have a lang or xml:lang attribute which describes the \
                 language of the document."
            }
            RuleCode::DuplicateId => "Duplicate id attribute value found on the web page.",
            RuleCode::ButtonName => {
                "This button element does not have a name available to an accessibility API."
            }
        }
    }

    /// Markup or CSS illustrating how to satisfy the rule.
    pub fn remediation(&self) -> &'static str {
        match self {
            RuleCode::ImageAlt => r#"<img src="logo.png" alt="Acme Corporation logo">"#,
            RuleCode::FormLabel => {
                r#"<label for="email">Email address</label> <input type="email" id="email">"#
            }
            RuleCode::HeadingStructure => {
                r#"<h2>Our services</h2> instead of <p class="title">Our services</p>"#
            }
            RuleCode::ContrastMinimum => "color: #595959; background-color: #ffffff; /* 7:1 */",
            RuleCode::ContrastEnhanced => {
                "color: #1a1a1a; background-color: #ffffff; /* 17.4:1 */"
            }
            RuleCode::PageTitle => "<head><title>Pricing | Acme Corporation</title></head>",
            RuleCode::LinkPurpose => r#"<a href="/reports/2024">Read the 2024 annual report</a>"#,
            RuleCode::FocusVisible => {
                "a:focus-visible, button:focus-visible { outline: 3px solid #1a73e8; }"
            }
            RuleCode::HtmlLang => r#"<html lang="en">"#,
            RuleCode::DuplicateId => {
                r#"<div id="nav-main">…</div> <div id="nav-footer">…</div>"#
            }
            RuleCode::ButtonName => {
                r#"<button type="button" aria-label="Close dialog">×</button>"#
            }
        }
    }

    /// Resolve a rule code given either in full or as a bare technique path.
    ///
    /// A full code must name the principle and guideline the rule belongs to.
    pub fn from_code(code: &str) -> Option<RuleCode> {
        let caps = code_regex().captures(code.trim())?;
        let guideline = caps.get(1).map(|m| m.as_str());
        let path = caps.get(2)?.as_str();
        RuleCode::ALL
            .into_iter()
            .find(|r| r.path() == path && guideline.map_or(true, |g| g == r.guideline()))
    }
}

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:WCAG2(?:A|AA|AAA)\.(Principle\d\.Guideline\d_\d+)\.)?(\d+_\d+_\d+\..+)$",
        )
        .expect("rule code regex")
    })
}

fn criterion_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|\.)(\d+)_(\d+)_(\d+)(?:\.|$)").expect("criterion regex")
    })
}

/// Extract the success criterion (`1.4.3`) from a rule code.
pub fn criterion_of(code: &str) -> Option<String> {
    let caps = criterion_regex().captures(code)?;
    Some(format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]))
}

/// Remediation example for `code`; unknown codes get `FALLBACK_REMEDIATION`.
pub fn remediation_example(code: &str) -> &'static str {
    match RuleCode::from_code(code) {
        Some(rule) => rule.remediation(),
        None => FALLBACK_REMEDIATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_full_and_bare_forms() {
        assert_eq!(
            RuleCode::from_code("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37"),
            Some(RuleCode::ImageAlt)
        );
        assert_eq!(
            RuleCode::from_code("WCAG2A.Principle1.Guideline1_1.1_1_1.H37"),
            Some(RuleCode::ImageAlt)
        );
        assert_eq!(RuleCode::from_code("4_1_2.H91.Button.Name"), Some(RuleCode::ButtonName));
        assert_eq!(RuleCode::from_code("WCAG2AA.Principle9.Guideline9_9.9_9_9.X1"), None);
    }

    #[test]
    fn test_from_code_rejects_wrong_guideline() {
        assert_eq!(RuleCode::from_code("WCAG2AA.Principle4.Guideline4_1.1_1_1.H37"), None);
        assert_eq!(
            remediation_example("WCAG2AA.Principle4.Guideline4_1.1_1_1.H37"),
            FALLBACK_REMEDIATION
        );
    }

    #[test]
    fn test_every_rule_round_trips_through_its_code() {
        for rule in RuleCode::ALL {
            assert_eq!(RuleCode::from_code(&rule.code()), Some(rule), "{:?}", rule);
        }
    }

    #[test]
    fn test_remediation_known_code() {
        assert_eq!(
            remediation_example("WCAG2AA.Principle3.Guideline3_1.3_1_1.H57.2"),
            r#"<html lang="en">"#
        );
    }

    #[test]
    fn test_remediation_unknown_code_falls_back() {
        assert_eq!(remediation_example("not-a-rule"), FALLBACK_REMEDIATION);
        assert_eq!(remediation_example(""), FALLBACK_REMEDIATION);
    }

    #[test]
    fn test_criterion_of() {
        assert_eq!(
            criterion_of("WCAG2AA.Principle1.Guideline1_4.1_4_3.G18.Fail").as_deref(),
            Some("1.4.3")
        );
        assert_eq!(criterion_of("color-contrast"), None);
    }

    #[test]
    fn test_aaa_rule_uses_aaa_prefix() {
        assert!(RuleCode::ContrastEnhanced.code().starts_with("WCAG2AAA."));
        assert!(RuleCode::ContrastMinimum.code().starts_with("WCAG2AA."));
    }
}
