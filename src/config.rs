// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::error::ConfigError;
use crate::report::OutputFormat;

pub const ENV_CONFIG: &str = "BRANDCAST_CONFIG";
pub const ENV_DATASET: &str = "BRANDCAST_DATASET";
pub const ENV_FORMAT: &str = "BRANDCAST_FORMAT";

/// Years selected when none are given.
pub const DEFAULT_YEARS: [i32; 2] = [2022, 2023];

/// Runtime settings. Sources, lowest precedence first: defaults, YAML file
/// named by `BRANDCAST_CONFIG`, environment, positional `[BRAND] [YEAR ...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: PathBuf,
    /// `None` selects the first brand in the dataset.
    pub brand: Option<String>,
    pub years: Vec<i32>,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/brand_equity.csv"),
            brand: None,
            years: DEFAULT_YEARS.to_vec(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Resolve from the process environment and `std::env::args`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::resolve(|k| std::env::var(k).ok(), &args)
    }

    /// Resolve with an injectable environment lookup; `args` excludes the program name.
    pub fn resolve<F>(env: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match env(ENV_CONFIG) {
            Some(path) => Self::from_yaml_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(ds) = env(ENV_DATASET).filter(|s| !s.trim().is_empty()) {
            cfg.dataset = PathBuf::from(ds);
        }
        if let Some(fmt) = env(ENV_FORMAT) {
            cfg.format = fmt.parse()?;
        }

        let mut args = args.iter();
        if let Some(brand) = args.next() {
            // "-" keeps whatever brand the file/defaults chose
            if brand != "-" {
                cfg.brand = Some(brand.clone());
            }
        }
        let years: Vec<i32> = args
            .map(|a| {
                a.trim()
                    .parse::<i32>()
                    .map_err(|_| ConfigError::InvalidYear(a.clone()))
            })
            .collect::<Result<_, _>>()?;
        if !years.is_empty() {
            cfg.years = years;
        }

        debug!(?cfg, "resolved config");
        Ok(cfg)
    }

    pub fn from_yaml_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml { path, source })
    }
}
