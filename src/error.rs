use std::path::PathBuf;

/// Library-level structured errors for tosh.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ToshError {
	#[error("Key not found: {key}")]
	KeyNotFound { key: String },

	#[error("Empty key argument")]
	EmptyKey,

	#[error("Empty section argument")]
	EmptySection,

	#[error("Failed to read source file: {path}")]
	SourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read settings file: {path}")]
	SettingsRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Tool not found: {tool}")]
	ToolNotFound { tool: String },

	#[error("Failed to run tool: {tool}")]
	ToolFailed {
		tool: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Tool returned unexpected exit code: {tool} (exit code: {code})")]
	ToolExit { tool: String, code: i32 },
}

/// Result type alias using ToshError.
pub type Result<T> = std::result::Result<T, ToshError>;
