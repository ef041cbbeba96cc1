use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::session::ProblemOrder;

pub const DEFAULT_CSV: &str = "problems.csv";
pub const DEFAULT_LIMIT_SECS: u64 = 30;

/// Effective settings for one quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub csv_path: PathBuf,
    pub time_limit: Duration,
    pub shuffle: bool,
    /// Seed for a reproducible shuffle. Unused unless `shuffle` is set.
    pub seed: Option<u64>,
}

/// Partially specified settings from one source (CLI, env, or file).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub csv: Option<PathBuf>,
    pub limit: Option<u64>,
    pub random: Option<bool>,
    pub seed: Option<u64>,
}

/// Raw TOML file structure for `~/.config/quiz-runner/config.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    csv: Option<PathBuf>,
    limit: Option<u64>,
    random: Option<bool>,
    seed: Option<u64>,
}

impl ConfigFile {
    fn into_overrides(self) -> Overrides {
        Overrides {
            csv: self.csv,
            limit: self.limit,
            random: self.random,
            seed: self.seed,
        }
    }
}

impl Overrides {
    /// Read `QUIZ_CSV`, `QUIZ_LIMIT`, `QUIZ_RANDOM` and `QUIZ_SEED`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build overrides from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let csv = lookup("QUIZ_CSV")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let limit = lookup("QUIZ_LIMIT")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("QUIZ_LIMIT must be a whole number of seconds, got '{}'", s))
            })
            .transpose()?;
        let random = lookup("QUIZ_RANDOM").map(|s| parse_bool(&s)).transpose()?;
        let seed = lookup("QUIZ_SEED")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("QUIZ_SEED must be an unsigned integer, got '{}'", s))
            })
            .transpose()?;

        Ok(Self {
            csv,
            limit,
            random,
            seed,
        })
    }

    /// Fill unset fields from a lower-priority source.
    pub fn or(self, lower: Overrides) -> Overrides {
        Overrides {
            csv: self.csv.or(lower.csv),
            limit: self.limit.or(lower.limit),
            random: self.random.or(lower.random),
            seed: self.seed.or(lower.seed),
        }
    }
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quiz-runner").join("config.toml"))
}

impl QuizConfig {
    /// Load configuration from file, environment and CLI flags.
    ///
    /// Priority: CLI flags override environment variables, which override the
    /// config file. An explicit `config_path` must exist; the default location
    /// is optional.
    pub fn load(config_path: Option<&Path>, cli: Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config_file(&path)?,
                _ => ConfigFile::default(),
            },
        };
        let env = Overrides::from_env()?;

        Ok(Self::build(cli.or(env).or(file.into_overrides())))
    }

    /// Apply built-in defaults to merged overrides.
    pub fn build(resolved: Overrides) -> Self {
        Self {
            csv_path: resolved.csv.unwrap_or_else(|| PathBuf::from(DEFAULT_CSV)),
            time_limit: Duration::from_secs(resolved.limit.unwrap_or(DEFAULT_LIMIT_SECS)),
            shuffle: resolved.random.unwrap_or(false),
            seed: resolved.seed,
        }
    }

    pub fn order(&self) -> ProblemOrder {
        ProblemOrder::new(self.shuffle, self.seed)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("QUIZ_RANDOM must be true or false, got '{}'", other),
    }
}
