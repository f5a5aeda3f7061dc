use crate::config::builtin;
use crate::error::ThemefixError;
use crate::rules::{ClassLocator, CompiledOverride, CompiledRule};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level configuration from a `.themefix.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade and jump directly to ~/.themefix.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, this file is the only config consulted.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Built-in profile to start from.
	pub profile: Option<ProfileName>,

	/// Replaces the profile's file selector.
	pub selector: Option<SelectorSpec>,

	/// Substrings whose joint presence marks a file as already themed.
	pub themed_markers: Option<Vec<String>>,

	/// Markup attribute names whose values are class strings.
	pub attributes: Option<Vec<String>>,

	/// Print a line for files that needed no change.
	pub show_skipped: Option<bool>,

	/// Rules appended to the profile's full-only rules.
	#[serde(default)]
	pub rules: Vec<RuleSpec>,

	/// Rules appended to the profile's cleanup rules.
	#[serde(default)]
	pub cleanup: Vec<RuleSpec>,

	/// Marker-gated rules appended to the profile's overrides.
	#[serde(default)]
	pub overrides: Vec<OverrideSpec>,
}

/// Names of the built-in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProfileName {
	/// Walk `src/` for `.tsx` files and apply the comprehensive table.
	#[serde(rename = "all-themes")]
	AllThemes,

	/// Fixed list of page files and the page table.
	#[serde(rename = "pages")]
	Pages,

	/// No rules and no selector; everything comes from config files.
	#[serde(rename = "none")]
	Empty,
}

impl ProfileName {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProfileName::AllThemes => "all-themes",
			ProfileName::Pages => "pages",
			ProfileName::Empty => "none",
		}
	}
}

impl fmt::Display for ProfileName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ProfileName {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all-themes" => Ok(ProfileName::AllThemes),
			"pages" => Ok(ProfileName::Pages),
			"none" => Ok(ProfileName::Empty),
			other => Err(format!(
				"unknown profile `{}` (expected all-themes, pages or none)",
				other
			)),
		}
	}
}

/// A token-window rewrite rule as written in config.
///
/// `pattern` is one or more regexes separated by single spaces, each matched
/// against a whole token. `replacement` may reference captures (`$1`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleSpec {
	pub pattern: String,
	pub replacement: String,

	/// Token regex; a match is skipped when the token right after it matches.
	#[serde(default)]
	pub unless_next: Option<String>,
}

impl RuleSpec {
	pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
		Self {
			pattern: pattern.into(),
			replacement: replacement.into(),
			unless_next: None,
		}
	}

	pub fn unless_next(mut self, pattern: impl Into<String>) -> Self {
		self.unless_next = Some(pattern.into());
		self
	}

	pub fn validate(&self) -> Result<(), ThemefixError> {
		if self.pattern.trim().is_empty() {
			return Err(ThemefixError::InvalidRule {
				pattern: self.pattern.clone(),
				reason: "pattern is empty".to_string(),
			});
		}
		Ok(())
	}
}

/// A rule that only applies to class strings carrying every marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OverrideSpec {
	/// Label used in logs and `config show`.
	#[serde(default)]
	pub name: Option<String>,

	/// Token regexes; each must match at least one token of the class string.
	pub markers: Vec<String>,

	pub pattern: String,
	pub replacement: String,
}

impl OverrideSpec {
	pub fn rule(&self) -> RuleSpec {
		RuleSpec::new(self.pattern.clone(), self.replacement.clone())
	}

	pub fn label(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.pattern)
	}

	pub fn validate(&self) -> Result<(), ThemefixError> {
		self.rule().validate()?;
		if self.markers.is_empty() {
			return Err(ThemefixError::InvalidRule {
				pattern: self.pattern.clone(),
				reason: "override needs at least one marker".to_string(),
			});
		}
		Ok(())
	}
}

/// How candidate files are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorSpec {
	/// Recursive directory walk filtered by extension.
	Walk {
		root: PathBuf,
		/// Extensions to keep; empty keeps every file.
		#[serde(default)]
		extensions: Vec<String>,
		/// Directory names pruned from the walk.
		#[serde(default)]
		exclude: Vec<String>,
	},

	/// Fixed, ordered list of paths.
	List { files: Vec<PathBuf> },
}

impl SelectorSpec {
	pub fn validate(&self) -> Result<(), ThemefixError> {
		if let SelectorSpec::List { files } = self
			&& files.is_empty()
		{
			return Err(ThemefixError::InvalidRule {
				pattern: "selector".to_string(),
				reason: "list selector has no files".to_string(),
			});
		}
		Ok(())
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// A rule with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	pub rule: RuleSpec,
	pub source: PathBuf,
}

/// An override with its source config path.
#[derive(Debug, Clone)]
pub struct OverrideWithSource {
	pub spec: OverrideSpec,
	pub source: PathBuf,
}

/// Merged configuration from every config file in the cascade.
///
/// Scalar settings take the first value found (most specific config wins);
/// list settings are concatenated in cascade order.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	pub profile: Option<ProfileName>,
	pub selector: Option<SelectorSpec>,
	pub themed_markers: Option<Vec<String>>,
	pub attributes: Option<Vec<String>>,
	pub show_skipped: Option<bool>,
	pub rules: Vec<RuleWithSource>,
	pub cleanup: Vec<RuleWithSource>,
	pub overrides: Vec<OverrideWithSource>,
}

/// Everything a run needs, before regex compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSpec {
	pub selector: Option<SelectorSpec>,
	pub rules: Vec<RuleSpec>,
	pub cleanup: Vec<RuleSpec>,
	pub overrides: Vec<OverrideSpec>,
	pub themed_markers: Vec<String>,
	pub attributes: Vec<String>,
	pub show_skipped: bool,
}

impl MergedConfig {
	/// Layer this config on top of a built-in profile.
	///
	/// `cli_profile` takes precedence over any `profile` key; with neither,
	/// the `all-themes` profile is used.
	pub fn resolve(&self, cli_profile: Option<ProfileName>) -> ProfileSpec {
		let name = cli_profile
			.or(self.profile)
			.unwrap_or(ProfileName::AllThemes);
		let mut spec = builtin::profile(name);

		if let Some(ref selector) = self.selector {
			spec.selector = Some(selector.clone());
		}
		if let Some(ref markers) = self.themed_markers {
			spec.themed_markers = markers.clone();
		}
		if let Some(ref attributes) = self.attributes {
			spec.attributes = attributes.clone();
		}
		if let Some(show) = self.show_skipped {
			spec.show_skipped = show;
		}

		spec.rules.extend(self.rules.iter().map(|r| r.rule.clone()));
		spec.cleanup.extend(self.cleanup.iter().map(|r| r.rule.clone()));
		spec.overrides.extend(self.overrides.iter().map(|o| o.spec.clone()));

		spec
	}
}

impl Config {
	/// Validate every rule, override and selector in this config.
	///
	/// Rules and overrides are compiled, so a bad regex is caught here.
	pub fn validate(&self) -> Result<(), ThemefixError> {
		for rule in self.rules.iter().chain(&self.cleanup) {
			CompiledRule::compile(rule)?;
		}
		for spec in &self.overrides {
			CompiledOverride::compile(spec)?;
		}
		if let Some(ref selector) = self.selector {
			selector.validate()?;
		}
		if let Some(ref attributes) = self.attributes {
			if attributes.iter().any(|a| a.trim().is_empty()) {
				return Err(ThemefixError::InvalidRule {
					pattern: "attributes".to_string(),
					reason: "attribute names must not be empty".to_string(),
				});
			}
			ClassLocator::new(attributes)?;
		}
		Ok(())
	}
}
