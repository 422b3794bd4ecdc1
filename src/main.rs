//! allyscan CLI binary entry point.
//! Resolves configuration, drives the scan state machine and prints results.

use allyscan::aggregate::{aggregate, ScanMeta};
use allyscan::cli::{full_domain_override, Cli, Commands};
use allyscan::config::{self, CliOverrides, Effective, OutputMode};
use allyscan::input::load_pages;
use allyscan::models::{ScanOptions, ScanResult};
use allyscan::output::{render_rules, render_scan};
use allyscan::rules::{remediation_example, RuleCode};
use allyscan::scanner::{FixtureScanner, Scanner};
use allyscan::state::{AppState, Event, Phase};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use owo_colors::OwoColorize;
use std::collections::BTreeSet;
use std::path::Path;
use std::process::exit;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const EXIT_BELOW_THRESHOLD: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        "error:".to_string()
    } else {
        "error:".red().bold().to_string()
    }
}

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{} {:#}", error_prefix(), e);
            exit(EXIT_USAGE);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Scan {
            url,
            full_domain,
            no_full_domain,
            standards,
            output,
            seed,
            fail_under,
            root,
        } => {
            let eff = config::resolve_effective(&CliOverrides {
                root,
                output,
                standards,
                full_domain: full_domain_override(full_domain, no_full_domain),
                seed,
                fail_under,
            })?;
            if let Some(p) = eff.config_path.as_ref() {
                debug!(config = %p.display(), "loaded config");
            }
            let scanner = FixtureScanner {
                seed: eff.seed,
                delay: eff.delay,
                score_fallback: eff.score_fallback,
            };
            let result = run_scan(&scanner, &url, &eff)?;
            report(&result, &eff)
        }
        Commands::Aggregate {
            file,
            target,
            output,
            fail_under,
            root,
        } => {
            let eff = config::resolve_effective(&CliOverrides {
                root,
                output,
                fail_under,
                ..CliOverrides::default()
            })?;
            let pages = load_pages(Path::new(&file))?;
            let target_url = target
                .or_else(|| pages.first().map(|p| p.url.clone()))
                .unwrap_or_default();
            // The pages file carries no standards or scan mode; report none.
            let meta = ScanMeta {
                target_url,
                timestamp: Utc::now(),
                duration_seconds: pages.iter().map(|p| p.load_time_seconds).sum(),
                options: ScanOptions {
                    full_domain: false,
                    standards: BTreeSet::new(),
                },
                score_fallback: eff.score_fallback,
            };
            let result =
                aggregate(pages, meta).with_context(|| format!("cannot aggregate {}", file))?;
            report(&result, &eff)
        }
        Commands::Remediation { code } => {
            if RuleCode::from_code(&code).is_none() {
                debug!(code = %code, "unknown rule code; using generic guidance");
            }
            println!("{}", remediation_example(&code));
            Ok(0)
        }
        Commands::Rules { output } => {
            let mode = match output.as_deref() {
                None => OutputMode::Human,
                Some(s) => OutputMode::parse(s)
                    .with_context(|| format!("invalid output mode '{}' (expected human|json)", s))?,
            };
            println!("{}", render_rules(mode)?);
            Ok(0)
        }
    }
}

/// Drive one scan through the session state machine.
fn run_scan(scanner: &dyn Scanner, url: &str, eff: &Effective) -> Result<ScanResult> {
    let mut state = AppState::default()
        .apply(Event::EditUrl(url.to_string()))?
        .apply(Event::SetStandards(eff.standards.clone()))?;
    if eff.full_domain {
        state = state.apply(Event::ToggleFullDomain)?;
    }
    let state = state.apply(Event::Submit)?;
    let target = match &state.phase {
        Phase::Scanning { target } => target.clone(),
        _ => url.to_string(),
    };
    let state = match scanner.perform_scan(&target, &state.options()) {
        Ok(res) => state.apply(Event::Complete(res))?,
        Err(e) => {
            let failed = state.apply(Event::Fail(e.to_string()))?;
            anyhow::bail!(
                "scan failed: {}",
                failed.last_error.unwrap_or_else(|| e.to_string())
            );
        }
    };
    state
        .result()
        .cloned()
        .context("scan completed without a result")
}

fn report(result: &ScanResult, eff: &Effective) -> Result<i32> {
    println!("{}", render_scan(result, eff.output, eff.score_fallback)?);
    if let Some(threshold) = eff.fail_under {
        if result.compliance_score < threshold {
            warn!(
                score = result.compliance_score,
                threshold, "compliance score below threshold"
            );
            return Ok(EXIT_BELOW_THRESHOLD);
        }
    }
    Ok(0)
}
