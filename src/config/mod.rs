use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "githistory";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Branch whose reachable commits are scanned
    pub branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub authors_file: String,
    pub repos_file: String,
    pub date_format: String,
    pub json: bool,
    pub json_file: String,
    pub progress: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            branch: "master".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            authors_file: "authors.csv".to_string(),
            repos_file: "repos.csv".to_string(),
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            json: false,
            json_file: "history.json".to_string(),
            progress: true,
        }
    }
}

impl Config {
    /// Load `githistory.{toml,yaml,json}` from the working directory when
    /// present, or `path` when given (which must then exist).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let config = config::Config::builder()
            .add_source(source)
            .build()
            .with_context(|| match path {
                Some(path) => format!("Failed to read config file {}", path.display()),
                None => "Failed to read configuration".to_string(),
            })?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_plain_invocation() {
        let config = Config::default();
        assert_eq!(config.history.branch, "master");
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.output.authors_file, "authors.csv");
        assert_eq!(config.output.repos_file, "repos.csv");
        assert!(!config.output.json);
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("githistory.toml");
        fs::write(
            &path,
            "[history]\nbranch = \"main\"\n\n[output]\njson = true\n",
        )?;

        let config = Config::load(Some(path.as_path()))?;

        assert_eq!(config.history.branch, "main");
        assert!(config.output.json);
        assert_eq!(config.output.repos_file, "repos.csv");
        assert_eq!(config.output.date_format, "%Y-%m-%d %H:%M:%S");
        Ok(())
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }
}
