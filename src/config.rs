//! Configuration discovery and effective settings resolution.
//!
//! allyscan reads `allyscan.toml|yaml|yml` from the working directory (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `standards`: `["wcag2aa"]`
//! - `full_domain`: false
//! - `score_fallback`: 100
//! - `seed`: none (random per run)
//! - `delay_ms`: 0
//! - `fail_under`: none
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::aggregate::DEFAULT_SCORE_FALLBACK;
use crate::error::ConfigError;
use crate::models::StandardId;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_NAMES: [&str; 3] = ["allyscan.toml", "allyscan.yaml", "allyscan.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `allyscan.toml|yaml`.
pub struct AllyConfig {
    pub output: Option<String>,
    pub standards: Option<Vec<String>>,
    pub full_domain: Option<bool>,
    pub score_fallback: Option<u8>,
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
    pub fail_under: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Option<OutputMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Some(OutputMode::Human),
            "json" => Some(OutputMode::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: OutputMode,
    pub standards: BTreeSet<StandardId>,
    pub full_domain: bool,
    pub score_fallback: u8,
    pub seed: Option<u64>,
    pub delay: Duration,
    pub fail_under: Option<u8>,
}

/// CLI-provided values; `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root: Option<String>,
    pub output: Option<String>,
    pub standards: Vec<StandardId>,
    pub full_domain: Option<bool>,
    pub seed: Option<u64>,
    pub fail_under: Option<u8>,
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when an `allyscan.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AllyConfig` from `root` if a config file is present.
///
/// A present but unparseable file is an error rather than silently ignored.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, AllyConfig)>, ConfigError> {
    for name in CONFIG_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg: AllyConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                path: path.clone(),
                source,
            })?
        };
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.root.as_deref().unwrap_or("."));
    let root = detect_root(&start);
    let (config_path, cfg) = match load_config(&root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, AllyConfig::default()),
    };

    let output_src = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let output = OutputMode::parse(&output_src).ok_or_else(|| ConfigError::InvalidValue {
        key: "output".into(),
        message: format!("'{}' (expected human|json)", output_src),
    })?;

    let standards: BTreeSet<StandardId> = if !cli.standards.is_empty() {
        cli.standards.iter().copied().collect()
    } else if let Some(list) = cfg.standards {
        list.iter()
            .map(|s| {
                s.parse::<StandardId>().map_err(|message| ConfigError::InvalidValue {
                    key: "standards".into(),
                    message,
                })
            })
            .collect::<Result<_, _>>()?
    } else {
        BTreeSet::from([StandardId::Wcag2aa])
    };
    if standards.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "standards".into(),
            message: "at least one standard is required".into(),
        });
    }

    let score_fallback = cfg.score_fallback.unwrap_or(DEFAULT_SCORE_FALLBACK);
    if score_fallback > 100 {
        return Err(ConfigError::InvalidValue {
            key: "score_fallback".into(),
            message: format!("{} is not a percentage", score_fallback),
        });
    }
    let fail_under = cli.fail_under.or(cfg.fail_under);
    if let Some(f) = fail_under.filter(|f| *f > 100) {
        return Err(ConfigError::InvalidValue {
            key: "fail_under".into(),
            message: format!("{} is not a percentage", f),
        });
    }

    Ok(Effective {
        root,
        config_path,
        output,
        standards,
        full_domain: cli.full_domain.or(cfg.full_domain).unwrap_or(false),
        score_fallback,
        seed: cli.seed.or(cfg.seed),
        delay: Duration::from_millis(cfg.delay_ms.unwrap_or(0)),
        fail_under,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn overrides(root: &Path) -> CliOverrides {
        CliOverrides {
            root: Some(root.to_string_lossy().to_string()),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let eff = resolve_effective(&overrides(tmp.path())).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.output, OutputMode::Human);
        assert_eq!(eff.standards, BTreeSet::from([StandardId::Wcag2aa]));
        assert_eq!(eff.score_fallback, 100);
        assert!(!eff.full_domain);
        assert_eq!(eff.delay, Duration::ZERO);
    }

    #[test]
    fn test_toml_config_then_cli_override() {
        let tmp = tempdir().unwrap();
        let cfg = "output = \"json\"\n\
                    standards = [\"wcag2a\", \"section508\"]\n\
                    seed = 5\n\
                    score_fallback = 0\n";
        std::fs::write(tmp.path().join("allyscan.toml"), cfg).unwrap();
        let eff = resolve_effective(&overrides(tmp.path())).unwrap();
        assert_eq!(eff.output, OutputMode::Json);
        assert_eq!(eff.standards.len(), 2);
        assert_eq!(eff.seed, Some(5));
        assert_eq!(eff.score_fallback, 0);

        let mut cli = overrides(tmp.path());
        cli.output = Some("human".into());
        cli.standards = vec![StandardId::Wcag2aaa];
        cli.seed = Some(9);
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.output, OutputMode::Human);
        assert_eq!(eff.standards, BTreeSet::from([StandardId::Wcag2aaa]));
        assert_eq!(eff.seed, Some(9));
    }

    #[test]
    fn test_yaml_config_and_nested_discovery() {
        let tmp = tempdir().unwrap();
        let yaml = "full_domain: true\ndelay_ms: 15\n";
        std::fs::write(tmp.path().join("allyscan.yaml"), yaml).unwrap();
        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&overrides(&nested)).unwrap();
        assert_eq!(eff.root, tmp.path());
        assert!(eff.full_domain);
        assert_eq!(eff.delay, Duration::from_millis(15));

        let mut cli = overrides(&nested);
        cli.full_domain = Some(false);
        assert!(!resolve_effective(&cli).unwrap().full_domain);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("allyscan.toml"), "standards = [\"wcag9\"]\n").unwrap();
        assert!(matches!(
            resolve_effective(&overrides(tmp.path())),
            Err(ConfigError::InvalidValue { .. })
        ));

        std::fs::write(tmp.path().join("allyscan.toml"), "output = [").unwrap();
        assert!(matches!(
            resolve_effective(&overrides(tmp.path())),
            Err(ConfigError::Toml { .. })
        ));

        std::fs::write(tmp.path().join("allyscan.toml"), "output = \"xml\"\n").unwrap();
        assert!(matches!(
            resolve_effective(&overrides(tmp.path())),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
