//! Fixture data served in place of a real scanning engine.
//!
//! The single-page fixture is fixed. Domain-wide mode returns two fixed pages
//! followed by synthetic pages whose findings are drawn from a seeded RNG,
//! one RNG per page so generation can run in parallel and stay reproducible.

use crate::models::{Issue, PageResult};
use crate::rules::RuleCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use url::Url;

const SYNTHETIC_PATHS: [&str; 6] = [
    "/products",
    "/pricing",
    "/blog",
    "/contact",
    "/careers",
    "/support",
];

const ERROR_POOL: [RuleCode; 7] = [
    RuleCode::ImageAlt,
    RuleCode::FormLabel,
    RuleCode::ContrastMinimum,
    RuleCode::ButtonName,
    RuleCode::HtmlLang,
    RuleCode::DuplicateId,
    RuleCode::PageTitle,
];

const WARNING_POOL: [RuleCode; 4] = [
    RuleCode::HeadingStructure,
    RuleCode::LinkPurpose,
    RuleCode::FocusVisible,
    RuleCode::ContrastEnhanced,
];

const ERROR_CHANCE: f64 = 0.15;
const WARNING_CHANCE: f64 = 0.35;

/// Typical selector and DOM snippet reported for a rule.
fn sample_location(rule: RuleCode) -> (&'static str, &'static str) {
    match rule {
        RuleCode::ImageAlt => (
            "main > section.hero > img",
            r#"<img src="/assets/hero-banner.jpg" class="hero-img">"#,
        ),
        RuleCode::FormLabel => (
            "#newsletter-email",
            r#"<input type="email" id="newsletter-email" placeholder="Email">"#,
        ),
        RuleCode::HeadingStructure => {
            ("div.card > p.card-title", r#"<p class="card-title">Featured</p>"#)
        }
        RuleCode::ContrastMinimum => (
            "footer > p.legal",
            r#"<p class="legal" style="color:#aaaaaa">© 2024 Acme</p>"#,
        ),
        RuleCode::ContrastEnhanced => {
            ("nav > a.secondary", r#"<a class="secondary" href="/faq">FAQ</a>"#)
        }
        RuleCode::PageTitle => ("html > head", "<head><meta charset=\"utf-8\"></head>"),
        RuleCode::LinkPurpose => (
            "header > a.social-twitter",
            r#"<a href="https://twitter.com/acme" class="social-twitter"><i class="icon"></i></a>"#,
        ),
        RuleCode::FocusVisible => ("html > body", r#"<body class="no-outline">"#),
        RuleCode::HtmlLang => ("html", "<html>"),
        RuleCode::DuplicateId => ("#search", r#"<form id="search" role="search">"#),
        RuleCode::ButtonName => (
            "header > button.menu-toggle",
            r#"<button class="menu-toggle"><svg>…</svg></button>"#,
        ),
    }
}

fn issue(rule: RuleCode) -> Issue {
    let (selector, context) = sample_location(rule);
    Issue::from_rule(rule, selector, context)
}

fn page_url(base: &Url, path: &str) -> String {
    match base.join(path) {
        Ok(u) => u.to_string(),
        Err(_) => format!("{}{}", base.as_str().trim_end_matches('/'), path),
    }
}

fn title_for(path: &str) -> String {
    let word = path.trim_matches('/');
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Home".to_string(),
    }
}

/// Result returned for a scan of just the target URL.
pub fn single_page(target: &Url) -> PageResult {
    PageResult::new(
        target.as_str(),
        "Home",
        vec![
            issue(RuleCode::ImageAlt),
            issue(RuleCode::HeadingStructure),
            issue(RuleCode::LinkPurpose),
            issue(RuleCode::ContrastEnhanced),
        ],
        28,
        1.24,
        200,
    )
}

/// Pages returned for a domain-wide scan of `base`.
pub fn domain_pages(base: &Url, seed: u64) -> Vec<PageResult> {
    let mut pages = vec![
        PageResult::new(
            page_url(base, "/"),
            "Home",
            vec![
                issue(RuleCode::ImageAlt),
                issue(RuleCode::HeadingStructure),
                issue(RuleCode::LinkPurpose),
                issue(RuleCode::FocusVisible),
            ],
            45,
            1.12,
            200,
        ),
        PageResult::new(
            page_url(base, "/about"),
            "About",
            vec![issue(RuleCode::HeadingStructure)],
            32,
            0.87,
            200,
        ),
    ];
    let synthetic: Vec<PageResult> = SYNTHETIC_PATHS
        .par_iter()
        .enumerate()
        .map(|(i, path)| synthetic_page(base, path, page_seed(seed, i)))
        .collect();
    pages.extend(synthetic);
    pages
}

fn page_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn synthetic_page(base: &Url, path: &str, seed: u64) -> PageResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut issues = Vec::new();
    for rule in ERROR_POOL {
        if rng.gen_bool(ERROR_CHANCE) {
            issues.push(issue(rule));
        }
    }
    for rule in WARNING_POOL {
        if rng.gen_bool(WARNING_CHANCE) {
            issues.push(issue(rule));
        }
    }
    let passed = rng.gen_range(20..=50);
    let load_time = (rng.gen_range(0.4..2.5_f64) * 100.0).round() / 100.0;
    PageResult::new(page_url(base, path), title_for(path), issues, passed, load_time, 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_single_page_counts() {
        let p = single_page(&base());
        assert_eq!(p.passed_count, 28);
        assert_eq!(p.failed_count, 1);
        assert_eq!(p.warning_count, 3);
    }

    #[test]
    fn test_domain_pages_start_with_fixed_pages() {
        let pages = domain_pages(&base(), 7);
        assert_eq!(pages.len(), 2 + SYNTHETIC_PATHS.len());
        assert_eq!(pages[0].url, "https://example.com/");
        assert_eq!((pages[0].passed_count, pages[0].failed_count), (45, 1));
        assert_eq!(pages[1].url, "https://example.com/about");
        assert_eq!((pages[1].passed_count, pages[1].failed_count), (32, 0));
        assert_eq!(pages[2].title, "Products");
    }

    #[test]
    fn test_same_seed_same_pages() {
        assert_eq!(domain_pages(&base(), 42), domain_pages(&base(), 42));
    }

    #[test]
    fn test_synthetic_pages_keep_counter_invariant() {
        for seed in 0..20 {
            for p in domain_pages(&base(), seed) {
                assert!(p.validate().is_ok());
                let fixed = p.passed_count == 45 || p.passed_count == 32;
                assert!((20..=50).contains(&p.passed_count) || fixed);
            }
        }
    }
}
