use std::path::PathBuf;

/// Library-level structured errors for themefix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ThemefixError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid configuration in {path}")]
	InvalidConfig {
		path: PathBuf,
		#[source]
		source: Box<ThemefixError>,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid rule `{pattern}`: {reason}")]
	InvalidRule { pattern: String, reason: String },

	#[error("No file selector configured (profile `none` needs a [selector] table)")]
	NoSelector,

	#[error("File not found")]
	FileNotFound { path: PathBuf },

	#[error("Failed to read file: {path}")]
	FileReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	FileWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using ThemefixError.
pub type Result<T> = std::result::Result<T, ThemefixError>;
