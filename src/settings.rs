//! Settings for the tosh tool itself.
//!
//! This module handles:
//! - TOML settings file parsing
//! - The fixed lookup order: `$TOSH_CONFIG`, `./.tosh.toml`, `~/.tosh.toml`

use crate::error::{Result, ToshError};
use crate::text::ops::is_truthy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file. When set, that
/// file must load; read and parse failures are not shielded.
pub const CONFIG_ENV: &str = "TOSH_CONFIG";

/// Environment variable that, if truthy, skips the `~/.tosh.toml` lookup.
/// Useful for CI environments.
pub const NO_HOME_CONFIG_ENV: &str = "TOSH_NO_HOME_CONFIG";

/// File name searched in the current and home directories.
pub const SETTINGS_FILE: &str = ".tosh.toml";

/// Which replace/search implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendChoice {
	/// External tools when both resolve, the built-in engine otherwise.
	#[default]
	Auto,

	/// Resolved `sed`/`grep`; an error when either is missing.
	External,

	/// The built-in regex engine.
	Native,
}

impl BackendChoice {
	/// The name used in settings files and display output.
	pub fn as_str(&self) -> &'static str {
		match self {
			BackendChoice::Auto => "auto",
			BackendChoice::External => "external",
			BackendChoice::Native => "native",
		}
	}
}

/// Top-level settings from a `.tosh.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
	/// Replace/search backend selection.
	#[serde(default)]
	pub backend: BackendChoice,

	/// Explicit path to the sed binary. Wins over PATH lookup when it exists.
	#[serde(default)]
	pub sed_path: Option<PathBuf>,

	/// Explicit path to the grep binary. Wins over PATH lookup when it exists.
	#[serde(default)]
	pub grep_path: Option<PathBuf>,
}

/// Loaded settings with their source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	/// The parsed settings.
	pub settings: Settings,

	/// The file the settings were read from; `None` when defaults applied.
	pub path: Option<PathBuf>,
}

/// Load settings from the first location that has them.
///
/// The lookup order is:
/// 1. The file named by `$TOSH_CONFIG`, which must load if set
/// 2. `./.tosh.toml`
/// 3. `~/.tosh.toml`, unless `$TOSH_NO_HOME_CONFIG` is truthy
///
/// When none exist, defaults apply.
pub fn load() -> Result<LoadedSettings> {
	if let Ok(explicit) = std::env::var(CONFIG_ENV)
		&& !explicit.is_empty()
	{
		let path = PathBuf::from(explicit);
		let settings = parse_settings_file(&path)?;
		return Ok(LoadedSettings {
			settings,
			path: Some(path),
		});
	}

	let local = PathBuf::from(SETTINGS_FILE);
	if local.exists() {
		let settings = parse_settings_file(&local)?;
		return Ok(LoadedSettings {
			settings,
			path: Some(local),
		});
	}

	if !env_is_truthy(NO_HOME_CONFIG_ENV)
		&& let Some(home_dir) = dirs::home_dir()
	{
		let home = home_dir.join(SETTINGS_FILE);
		if home.exists() {
			let settings = parse_settings_file(&home)?;
			return Ok(LoadedSettings {
				settings,
				path: Some(home),
			});
		}
	}

	Ok(LoadedSettings {
		settings: Settings::default(),
		path: None,
	})
}

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<Settings> {
	let content = std::fs::read_to_string(path).map_err(|source| ToshError::SettingsRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<Settings> {
	toml::from_str(content).map_err(|source| ToshError::SettingsParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Check if an environment variable is set to a truthy value.
fn env_is_truthy(var_name: &str) -> bool {
	std::env::var(var_name).is_ok_and(|value| is_truthy(&value))
}
