//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/frametree/frametree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `FRAMETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{PrintOptions, DEFAULT_ROOT};

/// Tree dump formatting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PrintSettings {
    /// Digits after the decimal point
    pub precision: usize,
    /// Spaces per tree level
    pub indent_width: usize,
    /// Print values that round to zero without a minus sign
    pub clean_zeros: bool,
}

impl Default for PrintSettings {
    fn default() -> Self {
        let options = PrintOptions::default();
        Self {
            precision: options.precision,
            indent_width: options.indent_width,
            clean_zeros: options.clean_zeros,
        }
    }
}

impl From<PrintSettings> for PrintOptions {
    fn from(settings: PrintSettings) -> Self {
        Self {
            precision: settings.precision,
            indent_width: settings.indent_width,
            clean_zeros: settings.clean_zeros,
        }
    }
}

/// Raw print settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPrintSettings {
    pub precision: Option<usize>,
    pub indent_width: Option<usize>,
    pub clean_zeros: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_name: Option<String>,
    pub definition: Option<PathBuf>,
    pub print: RawPrintSettings,
}

/// Unified configuration for frametree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root frame name for definitions that do not name one (default: base)
    pub root_name: String,
    /// Definition file used when a command is given none
    pub definition: Option<PathBuf>,
    /// Tree dump formatting
    pub print: PrintSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT.to_string(),
            definition: None,
            print: PrintSettings::default(),
        }
    }
}

/// Get the XDG config directory for frametree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "frametree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("frametree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the definition path.
    fn expand_paths(&mut self) {
        if let Some(definition) = &self.definition {
            let raw = definition.to_string_lossy();
            let expanded = shellexpand::full(raw.as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            self.definition = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_name: overlay
                .root_name
                .clone()
                .unwrap_or_else(|| self.root_name.clone()),
            definition: overlay.definition.clone().or_else(|| self.definition.clone()),
            print: PrintSettings {
                precision: overlay.print.precision.unwrap_or(self.print.precision),
                indent_width: overlay.print.indent_width.unwrap_or(self.print.indent_width),
                clean_zeros: overlay.print.clean_zeros.unwrap_or(self.print.clean_zeros),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/frametree/frametree.toml`
    /// 3. `config_file`
    /// 4. Environment variables: `FRAMETREE_*` prefix, `__` between sections
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FRAMETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FRAMETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_name") {
            settings.root_name = val;
        }
        if let Ok(val) = config.get_string("definition") {
            settings.definition = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get::<usize>("print.precision") {
            settings.print.precision = val;
        }
        if let Ok(val) = config.get::<usize>("print.indent_width") {
            settings.print.indent_width = val;
        }
        if let Ok(val) = config.get_bool("print.clean_zeros") {
            settings.print.clean_zeros = val;
        }

        Ok(settings)
    }

    pub fn print_options(&self) -> PrintOptions {
        self.print.into()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# frametree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/frametree/frametree.toml
#   Explicit: --config <FILE>
#   Env:      FRAMETREE_* environment variables (FRAMETREE_PRINT__PRECISION=6)

# Root frame name for definition files without a `root` entry
# root_name = "base"

# Definition file used when a command is given none (~ and $VAR are expanded)
# definition = "~/robot/frames.toml"

[print]
# Digits after the decimal point
# precision = 4

# Spaces per tree level
# indent_width = 3

# Print values that round to zero as 0.0000 instead of -0.0000
# clean_zeros = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
