use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, OverrideWithSource, RuleWithSource};
use crate::error::{Result, ThemefixError};
use std::path::{Path, PathBuf};

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".themefix.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.themefix.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.themefix.toml
///
/// Returns configs in cascade order (most specific first). A relative
/// `start_dir` is resolved first so each directory is visited once.
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir
		.canonicalize()
		.or_else(|_| std::path::absolute(start_dir))
		.map_err(|source| ThemefixError::ConfigReadError {
			path: start_dir.to_path_buf(),
			source,
		})?;

	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			tracing::debug!(path = %config_path.display(), "loaded config");

			if config.no_external_lookup {
				configs.push(LoadedConfig {
					config,
					path: config_path,
				});
				return Ok(configs);
			}

			let stop = config.root;
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.themefix.toml if it exists and was not already loaded
/// by the directory walk.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	let user_config_path = user_config_path()?;

	if existing_configs
		.iter()
		.any(|c| is_same_path(&c.path, &user_config_path))
	{
		return Ok(None);
	}

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

fn is_same_path(a: &Path, b: &Path) -> bool {
	a == b || matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

/// Merge multiple configs into a single effective config.
///
/// Scalar settings come from the first config that sets them; rules,
/// cleanup rules and overrides are collected in cascade order.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		let config = &loaded.config;

		if merged.profile.is_none() {
			merged.profile = config.profile;
		}
		if merged.selector.is_none() {
			merged.selector = config.selector.clone();
		}
		if merged.themed_markers.is_none() {
			merged.themed_markers = config.themed_markers.clone();
		}
		if merged.attributes.is_none() {
			merged.attributes = config.attributes.clone();
		}
		if merged.show_skipped.is_none() {
			merged.show_skipped = config.show_skipped;
		}

		for rule in &config.rules {
			merged.rules.push(RuleWithSource {
				rule: rule.clone(),
				source: loaded.path.clone(),
			});
		}
		for rule in &config.cleanup {
			merged.cleanup.push(RuleWithSource {
				rule: rule.clone(),
				source: loaded.path.clone(),
			});
		}
		for spec in &config.overrides {
			merged.overrides.push(OverrideWithSource {
				spec: spec.clone(),
				source: loaded.path.clone(),
			});
		}
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ThemefixError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
