use crate::aggregator::DEFAULT_GAME_PREFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from crawler.toml.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct CrawlerConfig {
    pub input: InputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    pub game_prefix: String,
    /// Write the report here instead of stdout.
    pub output_file: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("quake.log"),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            game_prefix: DEFAULT_GAME_PREFIX.to_string(),
            output_file: None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_file: Option<PathBuf>,
    pub game_prefix: Option<String>,
    pub output_file: Option<PathBuf>,
}

impl CrawlerConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        Self::parse(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply CLI overrides on top of file values.
    pub fn merge_cli(&mut self, cli: CliOverrides) {
        if let Some(log_file) = cli.log_file {
            self.input.log_file = log_file;
        }
        if let Some(prefix) = cli.game_prefix {
            self.report.game_prefix = prefix;
        }
        if cli.output_file.is_some() {
            self.report.output_file = cli.output_file;
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = CrawlerConfig::default();
        assert_eq!(cfg.input.log_file, PathBuf::from("quake.log"));
        assert_eq!(cfg.report.game_prefix, "game_");
        assert_eq!(cfg.report.output_file, None);
    }

    #[test]
    fn parse_empty_is_default() {
        let cfg = CrawlerConfig::parse("").unwrap();
        assert_eq!(cfg, CrawlerConfig::default());
    }

    #[test]
    fn parse_partial_sections() {
        let cfg = CrawlerConfig::parse(
            r#"
[report]
game_prefix = "match_"
"#,
        )
        .unwrap();
        assert_eq!(cfg.report.game_prefix, "match_");
        assert_eq!(cfg.input.log_file, PathBuf::from("quake.log"));
    }

    #[test]
    fn parse_full() {
        let cfg = CrawlerConfig::parse(
            r#"
[input]
log_file = "/var/log/q3/games.log"

[report]
game_prefix = "g"
output_file = "out/report.json"
"#,
        )
        .unwrap();
        assert_eq!(cfg.input.log_file, PathBuf::from("/var/log/q3/games.log"));
        assert_eq!(cfg.report.game_prefix, "g");
        assert_eq!(
            cfg.report.output_file,
            Some(PathBuf::from("out/report.json"))
        );
    }

    #[test]
    fn parse_rejects_wrong_type() {
        assert!(CrawlerConfig::parse("[input]\nlog_file = 3\n").is_err());
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = CrawlerConfig::load(&dir.path().join("crawler.toml")).unwrap();
        assert_eq!(cfg, CrawlerConfig::default());
    }

    #[test]
    fn load_invalid_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crawler.toml");
        std::fs::write(&path, "[input\n").unwrap();
        let err = CrawlerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("crawler.toml"));
    }

    #[test]
    fn merge_cli_overrides_only_given_values() {
        let mut cfg = CrawlerConfig::parse("[report]\noutput_file = \"a.json\"\n").unwrap();
        cfg.merge_cli(CliOverrides {
            log_file: Some(PathBuf::from("other.log")),
            ..Default::default()
        });
        assert_eq!(cfg.input.log_file, PathBuf::from("other.log"));
        assert_eq!(cfg.report.game_prefix, "game_");
        assert_eq!(cfg.report.output_file, Some(PathBuf::from("a.json")));

        cfg.merge_cli(CliOverrides {
            game_prefix: Some("m".to_string()),
            output_file: Some(PathBuf::from("b.json")),
            ..Default::default()
        });
        assert_eq!(cfg.report.game_prefix, "m");
        assert_eq!(cfg.report.output_file, Some(PathBuf::from("b.json")));
    }
}
