//! Configuration module for `studytracker`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the per-user config directory
const DIR_VARIABLE: &str = "$STUDY_TRACKER";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 6] = [
    "level",
    "file",
    "verbose",
    "progress_file",
    "reports_dir",
    "syllabus_file",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty disables file logging
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file holding the progress record
    #[serde(default)]
    pub progress_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Syllabus TOML file; empty selects the built-in syllabus
    #[serde(default)]
    pub syllabus_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override progress file
    pub progress_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override syllabus file
    pub syllabus_file: Option<String>,
}

impl Config {
    /// Get the `$STUDY_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studytracker`
    /// - macOS: `~/Library/Application Support/studytracker`
    /// - Windows: `%APPDATA%\studytracker`
    #[must_use]
    pub fn get_studytracker_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studytracker")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that fields added in a newer release get their
    /// default values. Only fields that are empty here and non-empty in
    /// `defaults` are updated. `syllabus_file` is left alone since empty is
    /// a meaningful value for it.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.progress_file.is_empty() && !defaults.paths.progress_file.is_empty() {
            self.paths
                .progress_file
                .clone_from(&defaults.paths.progress_file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     progress_file: Some("/tmp/progress.json".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(progress_file) = &overrides.progress_file {
            self.paths.progress_file = Self::expand_variables(progress_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
        if let Some(syllabus_file) = &overrides.syllabus_file {
            self.paths.syllabus_file = Self::expand_variables(syllabus_file);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds and `dconfig.toml` for debug builds,
    /// inside [`get_studytracker_dir`](Self::get_studytracker_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studytracker_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDY_TRACKER` in a string to the config directory path
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let expanded = Config::expand_variables("$STUDY_TRACKER/progress.json");
    /// // "/home/user/.config/studytracker/progress.json"
    /// ```
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studytracker_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$STUDY_TRACKER` in every path value. Missing fields use their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.progress_file = Self::expand_variables(&config.paths.progress_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.syllabus_file = Self::expand_variables(&config.paths.syllabus_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed. The
    /// defaults are compiled into the binary, so this only fires on a broken build.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from
    ///   defaults and save it back when anything was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are listed in [`CONFIG_KEYS`]; dashed spellings such as
    /// `progress-file` are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "progress_file" | "progress-file" => Some(self.paths.progress_file.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "syllabus_file" | "syllabus-file" => Some(self.paths.syllabus_file.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Path values may use `$STUDY_TRACKER`. Call [`save()`](Config::save)
    /// to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (a level that is not a log level, a non-boolean for `verbose`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "progress_file" | "progress-file" => {
                self.paths.progress_file = Self::expand_variables(value);
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = Self::expand_variables(value),
            "syllabus_file" | "syllabus-file" => {
                self.paths.syllabus_file = Self::expand_variables(value);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "progress_file" | "progress-file" => self
                .paths
                .progress_file
                .clone_from(&defaults.paths.progress_file),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "syllabus_file" | "syllabus-file" => self
                .paths
                .syllabus_file
                .clone_from(&defaults.paths.syllabus_file),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Progress file path
    #[must_use]
    pub fn progress_path(&self) -> PathBuf {
        if self.paths.progress_file.is_empty() {
            Self::get_studytracker_dir().join("progress.json")
        } else {
            PathBuf::from(&self.paths.progress_file)
        }
    }

    /// Reports directory
    #[must_use]
    pub fn reports_path(&self) -> PathBuf {
        if self.paths.reports_dir.is_empty() {
            Self::get_studytracker_dir().join("reports")
        } else {
            PathBuf::from(&self.paths.reports_dir)
        }
    }

    /// Syllabus file, or `None` for the built-in syllabus
    #[must_use]
    pub fn syllabus_path(&self) -> Option<PathBuf> {
        if self.paths.syllabus_file.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.paths.syllabus_file))
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  progress_file = \"{}\"", self.paths.progress_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  syllabus_file = \"{}\"", self.paths.syllabus_file)?;

        Ok(())
    }
}
