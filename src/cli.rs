//! CLI argument parsing via `clap`.

use crate::models::StandardId;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "allyscan",
    version,
    about = "Accessibility scan reports (fixture-backed)",
    long_about = "allyscan — run a (simulated) accessibility scan for a URL and summarize \
                  findings into pass/fail/warning counts and a compliance score.\n\n\
                  Configuration precedence: CLI > allyscan.toml > defaults.",
    after_help = "Examples:\n  \
                  allyscan scan https://example.com\n  \
                  allyscan scan example.com --full-domain --seed 7 --output json\n  \
                  allyscan aggregate pages.json --target https://example.com\n  \
                  allyscan remediation WCAG2AA.Principle1.Guideline1_1.1_1_1.H37",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current allyscan version.")]
    Version,
    /// Scan a URL
    #[command(
        about = "Scan a URL",
        long_about = "Validate the URL, run a scan and print the aggregated result. \
                      The score is the rounded percentage of passed checks over passed+failed.",
        after_help = "Examples:\n  \
                      allyscan scan https://example.com --standard wcag2aa \
                      --standard section508\n  \
                      allyscan scan example.com --full-domain --fail-under 90"
    )]
    Scan {
        #[arg(help = "Target URL (http/https; bare hosts get https://)")]
        url: String,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            conflicts_with = "no_full_domain",
            help = "Scan the whole domain instead of a single page"
        )]
        full_domain: bool,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Scan a single page even if the config enables full_domain"
        )]
        no_full_domain: bool,
        #[arg(
            long = "standard",
            value_enum,
            help = "Standard to check against (repeatable; default: wcag2aa)"
        )]
        standards: Vec<StandardId>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Seed for domain-wide fixture generation")]
        seed: Option<u64>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(0..=100),
            help = "Exit 1 when the compliance score is below this value"
        )]
        fail_under: Option<u8>,
        #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
        root: Option<String>,
    },
    /// Aggregate page results from a JSON file
    #[command(
        about = "Aggregate page results",
        long_about = "Read a JSON array of page results, check each page's counters \
                      against its issues and print the aggregated result."
    )]
    Aggregate {
        #[arg(help = "Path to a JSON array of page results")]
        file: String,
        #[arg(long, help = "Target URL recorded in the result (default: first page URL)")]
        target: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(0..=100),
            help = "Exit 1 when the compliance score is below this value"
        )]
        fail_under: Option<u8>,
        #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
        root: Option<String>,
    },
    /// Print the remediation example for a rule code
    #[command(
        about = "Show remediation example",
        long_about = "Print a remediation example for a rule code. \
                      Unknown codes print generic guidance."
    )]
    Remediation {
        #[arg(help = "Rule code, full (WCAG2AA.Principle1...) or bare (1_1_1.H37)")]
        code: String,
    },
    /// List known rule codes
    #[command(
        about = "List known rules",
        long_about = "List the rule codes with their level, kind and summary."
    )]
    Rules {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

/// Collapse the `--full-domain`/`--no-full-domain` pair into an override.
pub fn full_domain_override(full_domain: bool, no_full_domain: bool) -> Option<bool> {
    match (full_domain, no_full_domain) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from([
            "allyscan",
            "scan",
            "example.com",
            "--full-domain",
            "--standard",
            "wcag2a",
            "--standard",
            "section508",
            "--seed",
            "3",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Scan {
                url,
                full_domain,
                standards,
                seed,
                ..
            } => {
                assert_eq!(url, "example.com");
                assert!(full_domain);
                assert_eq!(standards, vec![StandardId::Wcag2a, StandardId::Section508]);
                assert_eq!(seed, Some(3));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_no_full_domain_flag() {
        let cli = Cli::try_parse_from(["allyscan", "scan", "x", "--no-full-domain"]).unwrap();
        match cli.cmd {
            Commands::Scan {
                full_domain,
                no_full_domain,
                ..
            } => assert_eq!(full_domain_override(full_domain, no_full_domain), Some(false)),
            _ => panic!("expected scan"),
        }
        assert_eq!(full_domain_override(false, false), None);
        assert!(Cli::try_parse_from([
            "allyscan",
            "scan",
            "x",
            "--full-domain",
            "--no-full-domain"
        ])
        .is_err());
    }

    #[test]
    fn test_fail_under_out_of_range() {
        assert!(Cli::try_parse_from(["allyscan", "scan", "x", "--fail-under", "101"]).is_err());
    }
}
