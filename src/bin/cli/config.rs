use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use champnet::cli::import::DEFAULT_TEAM_PREFIXES;
use champnet::query::DEFAULT_TOP_PAIRS;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Default)]
pub struct CliConfig {
    path: Option<PathBuf>,
    data: RawConfig,
}

impl CliConfig {
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(default_config_path);
        let data = if let Some(config_path) = path.as_ref() {
            if config_path.exists() {
                read_file(config_path)?
            } else {
                RawConfig::default()
            }
        } else {
            RawConfig::default()
        };
        validate(&data)?;
        Ok(Self { path, data })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn matches_path(&self) -> Option<&PathBuf> {
        self.data.input.matches.as_ref()
    }

    pub fn team_prefixes(&self) -> [String; 2] {
        let [one, two] = DEFAULT_TEAM_PREFIXES;
        [
            self.data
                .input
                .team_one_prefix
                .clone()
                .unwrap_or_else(|| one.to_string()),
            self.data
                .input
                .team_two_prefix
                .clone()
                .unwrap_or_else(|| two.to_string()),
        ]
    }

    pub fn shards(&self) -> usize {
        self.data.build.shards.unwrap_or(1)
    }

    pub fn top_pairs(&self) -> usize {
        self.data.analytics.top_pairs.unwrap_or(DEFAULT_TOP_PAIRS)
    }

    pub fn influential_limit(&self) -> Option<usize> {
        self.data.analytics.influential_limit
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.data.logging.filter.as_deref()
    }

    /// Effective settings with every default spelled out.
    pub fn resolved(&self) -> RawConfig {
        let [one, two] = self.team_prefixes();
        RawConfig {
            input: InputSection {
                matches: self.data.input.matches.clone(),
                team_one_prefix: Some(one),
                team_two_prefix: Some(two),
            },
            build: BuildSection {
                shards: Some(self.shards()),
            },
            analytics: AnalyticsSection {
                top_pairs: Some(self.top_pairs()),
                influential_limit: self.influential_limit(),
            },
            logging: LoggingSection {
                filter: Some(
                    self.log_filter()
                        .unwrap_or(DEFAULT_LOG_FILTER)
                        .to_string(),
                ),
            },
        }
    }

    pub fn render(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.resolved()).map_err(|source| ConfigError::Serialize { source })
    }

    /// Writes the resolved settings to the config path. Refuses to replace an
    /// existing file unless `force` is set.
    pub fn persist(&self, force: bool) -> Result<PathBuf, ConfigError> {
        let target = if let Some(path) = &self.path {
            path.clone()
        } else if let Some(default) = default_config_path() {
            default
        } else {
            return Err(ConfigError::NoConfigPath);
        };
        if target.exists() && !force {
            return Err(ConfigError::AlreadyExists { path: target });
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized = self.render()?;
        fs::write(&target, serialized).map_err(|source| ConfigError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate(data: &RawConfig) -> Result<(), ConfigError> {
    if data.build.shards == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "build.shards",
            reason: "must be at least 1",
        });
    }
    if data.analytics.top_pairs == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "analytics.top_pairs",
            reason: "must be at least 1",
        });
    }
    for (key, prefix) in [
        ("input.team_one_prefix", &data.input.team_one_prefix),
        ("input.team_two_prefix", &data.input.team_two_prefix),
    ] {
        if prefix.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key,
                reason: "must not be empty",
            });
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RawConfig {
    #[serde(default)]
    input: InputSection,
    #[serde(default)]
    build: BuildSection,
    #[serde(default)]
    analytics: AnalyticsSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct InputSection {
    matches: Option<PathBuf>,
    team_one_prefix: Option<String>,
    team_two_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct BuildSection {
    shards: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct AnalyticsSection {
    top_pairs: Option<usize>,
    influential_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LoggingSection {
    filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CLI config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CLI config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize CLI config: {source}")]
    Serialize { source: toml::ser::Error },
    #[error("failed to write CLI config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
    #[error("config value {key} {reason}")]
    InvalidValue {
        key: &'static str,
        reason: &'static str,
    },
    #[error("no config directory found; pass --config or set CHAMPNET_CONFIG")]
    NoConfigPath,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("champnet").join("config.toml"))
}
