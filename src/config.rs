use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitConfig {
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Extra `KEY=VALUE` environment entries for every git invocation.
    /// From the environment: `GITSYNC__GIT__ENV=A=1,B=2`.
    #[serde(default)]
    pub env: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryConfig {
    #[serde(default = "default_repository_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            env: Vec::new(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repository_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

pub(crate) fn default_binary() -> PathBuf {
    PathBuf::from("git")
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_filter() -> String {
    "info".to_string()
}

impl GitConfig {
    pub fn env_pairs(&self) -> Result<Vec<(String, String)>> {
        self.env
            .iter()
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
                _ => Err(AppError::Config(format!(
                    "git.env entry must be KEY=VALUE: {entry}"
                ))),
            })
            .collect()
    }
}

/// `GITSYNC__SECTION__FIELD` overrides. `git.env` is split on commas.
fn environment() -> config::Environment {
    config::Environment::with_prefix("GITSYNC")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("git.env")
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with(config_path, environment())
    }

    fn load_with(config_path: Option<&str>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("gitsync").required(false));
        }

        // Environment variable overrides with GITSYNC_ prefix
        builder = builder.add_source(env);

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
