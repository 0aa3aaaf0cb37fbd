use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Heading level `{key}` is not an integer")]
    InvalidHeadingLevel { key: String },
}

/// User defaults, overridden by command-line flags.
///
/// Every field is optional; unset fields fall back to the converter defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Note a vault walk starts from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Level of the top structural headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_bibliography: Option<bool>,
    /// BibTeX database cited notes resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibliography: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphics: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appendix_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibliography_marker: Option<String>,
    /// Signed heading level (as a string key) to sectioning command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_levels: Option<BTreeMap<String, String>>,
}

impl Config {
    /// Reads the config at `path`, or `None` when there is no file there.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(config.with_expanded_paths()))
    }

    /// Reads the config from [`Config::config_path`].
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn config_path() -> PathBuf {
        let home = shellexpand::tilde("~/.config/vaultex");
        Path::new(home.as_ref()).join("config.toml")
    }

    // Tilde and environment variables in path fields
    fn with_expanded_paths(mut self) -> Self {
        let fields = [
            &mut self.bibliography,
            &mut self.graphics,
            &mut self.main_template,
            &mut self.job_template,
        ];
        for path in fields.into_iter().flatten() {
            if let Some(expanded) = Self::expand_path(path) {
                *path = expanded;
            }
        }
        self
    }

    /// The heading level table with its keys parsed as signed integers.
    pub fn heading_levels(&self) -> Result<Option<BTreeMap<i32, String>>, ConfigError> {
        let Some(levels) = &self.heading_levels else {
            return Ok(None);
        };
        levels
            .iter()
            .map(|(key, command)| match key.trim().parse::<i32>() {
                Ok(level) => Ok((level, command.clone())),
                Err(_) => Err(ConfigError::InvalidHeadingLevel { key: key.clone() }),
            })
            .collect::<Result<_, _>>()
            .map(Some)
    }

    /// Expands `~` and `$VAR` references; `None` when a variable is unset.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.into_owned()))
    }
}
