//! Configuration loading for the CLI.
//!
//! Settings come from `annogen.toml` and are overridden by command-line flags.

use crate::error::{CliResult, ConfigError};
use annogen::Precedence;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "annogen.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub scan: ScanConfig,
    pub generators: GeneratorsConfig,
    pub logging: LoggingConfig,
}

/// Where and how generated files are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for generated files.
    pub dir: PathBuf,

    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
}

/// Source discovery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob matched against paths relative to the input directory.
    pub include: Option<String>,

    pub respect_gitignore: bool,
}

/// Generator registry settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorsConfig {
    /// Built-in generator names to leave unregistered.
    pub disabled: Vec<String>,

    /// How caller generators layer over the built-ins.
    pub precedence: Precedence,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            dry_run: false,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: None,
            respect_gitignore: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Loads, validates and merges configuration.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from `path`, or from `annogen.toml` in the working
    /// directory. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path.unwrap_or(Path::new(CONFIG_FILENAME));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, config_path)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str, origin: &Path) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(origin.to_path_buf(), e.to_string()))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Check values serde cannot check.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    config.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if let Some(pattern) = &config.scan.include {
            glob::Pattern::new(pattern)
                .map_err(|e| ConfigError::invalid_value("scan.include", e.to_string()))?;
        }

        if let Some(name) = config.generators.disabled.iter().find(|n| n.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "generators.disabled",
                format!("empty generator name '{}'", name),
            ));
        }

        Ok(())
    }

    /// Load the configuration file and apply command-line overrides.
    ///
    /// The result is the final configuration, including the log level, so
    /// logging must be installed from it and not from the file alone.
    pub fn resolve(path: Option<&Path>, args: &CliArgs) -> CliResult<Config> {
        Ok(Self::merge_cli_args(Self::load(path)?, args))
    }

    /// Apply command-line overrides. Flags win over file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if args.dry_run {
            config.output.dry_run = true;
        }

        if let Some(ref filter) = args.filter {
            config.scan.include = Some(filter.clone());
        }

        if args.verbose {
            config.logging.level = "debug".to_string();
        }

        config
    }

    /// Write the commented default configuration to `path`.
    pub fn init(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        std::fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# annogen configuration file

[output]
# Root directory for generated files
dir = "./generated"

# Report generated files without writing them
dry_run = false

[scan]
# Only scan files matching this glob (relative to the input directory)
# include = "src/**/*.rs"

# Skip files ignored by .gitignore
respect_gitignore = true

[generators]
# Built-in generators to disable (templater, manifest)
disabled = []

# When caller generators collide with built-ins: "ours" keeps the built-in,
# "theirs" replaces it
precedence = "ours"

[logging]
# Default level when RUST_LOG is unset (trace, debug, info, warn, error)
level = "info"

# Emit JSON log lines
json = false
"#
    }
}

/// Command-line values that override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub filter: Option<String>,
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert!(!config.output.dry_run);
        assert!(config.scan.include.is_none());
        assert!(config.scan.respect_gitignore);
        assert!(config.generators.disabled.is_empty());
        assert_eq!(config.generators.precedence, Precedence::OursOverTheirs);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config =
            ConfigManager::parse(ConfigManager::default_config_content(), Path::new("x")).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.generators.precedence, Precedence::OursOverTheirs);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[output]
dir = "./out"
dry_run = true

[scan]
include = "src/**/*.rs"
respect_gitignore = false

[generators]
disabled = ["manifest"]
precedence = "theirs"

[logging]
level = "warn"
json = true
"#;

        let config = ConfigManager::parse(toml, Path::new("annogen.toml")).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./out"));
        assert!(config.output.dry_run);
        assert_eq!(config.scan.include.as_deref(), Some("src/**/*.rs"));
        assert!(!config.scan.respect_gitignore);
        assert_eq!(config.generators.disabled, vec!["manifest".to_string()]);
        assert_eq!(config.generators.precedence, Precedence::TheirsOverOurs);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ConfigManager::parse("[logging]\njson = true\n", Path::new("x")).unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ConfigManager::parse("[logging]\nlevel = \"loud\"\n", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        let err = ConfigManager::parse("[scan]\ninclude = \"[\"\n", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("scan.include"));

        let err = ConfigManager::parse("[generators]\nprecedence = \"mine\"\n", Path::new("x"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::InvalidToml { .. })
        ));
    }

    #[test]
    fn test_merge_cli_args() {
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            dry_run: true,
            filter: Some("**/models/*.rs".to_string()),
            verbose: true,
        };

        let merged = ConfigManager::merge_cli_args(Config::default(), &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert!(merged.output.dry_run);
        assert_eq!(merged.scan.include.as_deref(), Some("**/models/*.rs"));
        assert_eq!(merged.logging.level, "debug");
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let mut config = Config::default();
        config.output.dry_run = true;
        config.logging.level = "warn".to_string();

        let merged = ConfigManager::merge_cli_args(config, &CliArgs::default());
        assert!(merged.output.dry_run);
        assert_eq!(merged.logging.level, "warn");
        assert_eq!(merged.output.dir, PathBuf::from("./generated"));
    }

    #[test]
    fn test_resolve_verbose_overrides_file_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let quiet = ConfigManager::resolve(Some(&path), &CliArgs::default()).unwrap();
        assert_eq!(quiet.logging.level, "warn");

        let args = CliArgs {
            verbose: true,
            ..CliArgs::default()
        };
        let verbose = ConfigManager::resolve(Some(&path), &args).unwrap();
        assert_eq!(verbose.logging.level, "debug");
        assert_eq!(
            crate::logging::build_env_filter(&verbose.logging).to_string(),
            crate::logging::build_env_filter(&LoggingConfig {
                level: "debug".to_string(),
                json: false,
            })
            .to_string()
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);

        ConfigManager::init(&path, false).unwrap();
        assert!(path.exists());

        let err = ConfigManager::init(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));

        std::fs::write(&path, "garbage").unwrap();
        ConfigManager::init(&path, true).unwrap();
        assert!(ConfigManager::load(Some(&path)).is_ok());
    }
}
