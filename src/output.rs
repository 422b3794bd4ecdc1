//! Output rendering for scan results and rule listings.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! serialized `ScanResult` with camelCase fields.

use crate::config::OutputMode;
use crate::models::{IssueKind, PageResult, ScanResult};
use crate::rules::RuleCode;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && std::env::var_os("NO_COLOR").is_none()
}

fn paint_score(score: u8, color: bool) -> String {
    let s = format!("{}%", score);
    if !color {
        return s;
    }
    match score {
        90..=100 => s.green().bold().to_string(),
        70..=89 => s.yellow().bold().to_string(),
        _ => s.red().bold().to_string(),
    }
}

/// Render a scan result in the requested format.
pub fn render_scan(
    res: &ScanResult,
    output: OutputMode,
    score_fallback: u8,
) -> Result<String, serde_json::Error> {
    match output {
        OutputMode::Json => serde_json::to_string_pretty(&compose_scan_json(res)?),
        OutputMode::Human => Ok(render_scan_human(res, score_fallback, use_colors(output))),
    }
}

fn render_scan_human(res: &ScanResult, score_fallback: u8, color: bool) -> String {
    let mut out = String::new();
    let header = format!(
        "Accessibility report for {} ({})",
        res.target_url,
        res.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');
    let standards: Vec<&str> = res.standards.iter().map(|s| s.as_str()).collect();
    out.push_str(&format!(
        "standards: {}  mode: {}\n",
        if standards.is_empty() { "-".to_string() } else { standards.join(", ") },
        if res.full_domain { "domain" } else { "single page" }
    ));
    for page in &res.pages {
        out.push('\n');
        render_page(&mut out, page, score_fallback, color);
    }
    let summary = format!(
        "— Summary — pages={} passed={} failed={} warnings={} duration={:.2}s score=",
        res.pages.len(),
        res.total_passed,
        res.total_failed,
        res.total_warnings,
        res.duration_seconds
    );
    out.push('\n');
    if color {
        out.push_str(&summary.bold().to_string());
    } else {
        out.push_str(&summary);
    }
    out.push_str(&paint_score(res.compliance_score, color));
    out
}

fn render_page(out: &mut String, page: &PageResult, score_fallback: u8, color: bool) {
    let title = if color {
        page.url.clone().bold().to_string()
    } else {
        page.url.clone()
    };
    out.push_str(&format!(
        "{} — {} [{}] {:.2}s score={}\n",
        title,
        page.title,
        page.status_code,
        page.load_time_seconds,
        paint_score(page.score_or(score_fallback), color)
    ));
    out.push_str(&format!(
        "  passed={} failed={} warnings={}\n",
        page.passed_count, page.failed_count, page.warning_count
    ));
    // errors first, then warnings
    for is in page.errors().chain(page.warnings()) {
        let (icon, sev) = match is.kind {
            IssueKind::Error if color => {
                ("✖".red().to_string(), "⟦error⟧".red().bold().to_string())
            }
            IssueKind::Warning if color => {
                ("▲".yellow().to_string(), "⟦warn⟧".yellow().bold().to_string())
            }
            IssueKind::Error => ("✖".to_string(), "⟦error⟧".to_string()),
            IssueKind::Warning => ("▲".to_string(), "⟦warn⟧".to_string()),
        };
        let criterion = is
            .criterion()
            .map(|c| format!(" (WCAG {})", c))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {} {} ❲{}❳{} — {}\n",
            icon, sev, is.rule_code, criterion, is.message
        ));
        out.push_str(&format!("      at {}  {}\n", is.selector, is.context));
        out.push_str(&format!("      fix: {}\n", is.remediation()));
    }
}

/// Render the known rule set.
pub fn render_rules(output: OutputMode) -> Result<String, serde_json::Error> {
    match output {
        OutputMode::Json => serde_json::to_string_pretty(&compose_rules_json()),
        OutputMode::Human => {
            let color = use_colors(output);
            let lines: Vec<String> = RuleCode::ALL
                .iter()
                .map(|r| {
                    let code = if color { r.code().bold().to_string() } else { r.code() };
                    format!("{} [{} {}] {}", code, r.level(), r.default_kind(), r.summary())
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Compose scan JSON (pure) for testing/snapshot purposes.
pub fn compose_scan_json(res: &ScanResult) -> Result<JsonVal, serde_json::Error> {
    serde_json::to_value(res)
}

/// Compose rules JSON (pure) for testing/snapshot purposes.
pub fn compose_rules_json() -> JsonVal {
    let items: Vec<_> = RuleCode::ALL
        .iter()
        .map(|r| {
            json!({
                "code": r.code(),
                "level": r.level().to_string(),
                "kind": r.default_kind(),
                "summary": r.summary(),
                "remediation": r.remediation(),
            })
        })
        .collect();
    json!({ "rules": items, "total": items.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, ScanMeta};
    use crate::models::{Issue, PageResult};

    fn sample() -> ScanResult {
        let page = PageResult::new(
            "https://example.com/",
            "Home",
            vec![Issue::from_rule(RuleCode::ImageAlt, "img.hero", "<img src=a.png>")],
            28,
            1.2,
            200,
        );
        aggregate(vec![page], ScanMeta::new("https://example.com/")).unwrap()
    }

    #[test]
    fn test_compose_scan_json_shape() {
        let out = compose_scan_json(&sample()).unwrap();
        assert_eq!(out["targetUrl"], "https://example.com/");
        assert_eq!(out["totalPassed"], 28);
        assert_eq!(out["totalFailed"], 1);
        assert_eq!(out["complianceScore"], 97);
        assert_eq!(out["pages"][0]["issues"][0]["kind"], "error");
        assert_eq!(out["standards"][0], "wcag2aa");
    }

    #[test]
    fn test_human_render_without_color() {
        let text = render_scan_human(&sample(), 100, false);
        assert!(text.contains("https://example.com/ — Home [200]"));
        assert!(text.contains("⟦error⟧"));
        assert!(text.contains("(WCAG 1.1.1)"));
        assert!(text.contains("fix: <img src=\"logo.png\""));
        assert!(text.ends_with("score=97%"));
    }

    #[test]
    fn test_human_render_lists_errors_before_warnings() {
        let page = PageResult::new(
            "https://example.com/",
            "Home",
            vec![
                Issue::from_rule(RuleCode::HeadingStructure, "p.title", "<p>"),
                Issue::from_rule(RuleCode::ImageAlt, "img.hero", "<img>"),
            ],
            10,
            0.5,
            200,
        );
        let res = aggregate(vec![page], ScanMeta::new("https://example.com/")).unwrap();
        let text = render_scan_human(&res, 100, false);
        let error_at = text.find("⟦error⟧").unwrap();
        let warn_at = text.find("⟦warn⟧").unwrap();
        assert!(error_at < warn_at);
    }

    #[test]
    fn test_compose_rules_json_lists_all_rules() {
        let out = compose_rules_json();
        assert_eq!(out["total"], RuleCode::ALL.len());
        assert_eq!(out["rules"][0]["level"], "A");
    }
}
