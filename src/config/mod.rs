//! Configuration loading and parsing for themefix.
//!
//! This module handles:
//! - Built-in profiles (rule tables, file selectors)
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Config merging on top of a profile

pub mod builtin;
pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_merged_config, merge_configs, user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{
	Config, LoadedConfig, MergedConfig, OverrideSpec, OverrideWithSource, ProfileName,
	ProfileSpec, RuleSpec, RuleWithSource, SelectorSpec,
};

/// Template written by `themefix init`.
pub fn generate_init_template() -> &'static str {
	r#"# themefix configuration
#
# Settings here are layered on top of a built-in profile. Files are looked up
# from the working directory upwards; the nearest file wins for single values
# and list entries are appended in that order.

# Stop looking for .themefix.toml files in parent directories.
root = true

# Built-in profile: "all-themes" (walk src/ for .tsx files), "pages" (fixed
# page list) or "none" (start empty).
profile = "all-themes"

# Files that already contain every marker only get the cleanup rules.
#themed-markers = ["dark:text-white", "dark:bg-white/5"]

# Attributes whose values are rewritten.
#attributes = ["className", "class"]

# Print a line for files that needed no change.
#show-skipped = false

# Replace the profile's file selection.
#[selector]
#kind = "walk"
#root = "src"
#extensions = ["tsx", "jsx"]
#exclude = ["node_modules", ".next", "dist"]

# A pattern is one regex per token, separated by single spaces. It must match
# whole tokens. Replacements may use captures such as $1. With unless-next,
# a match is skipped when the following token matches that regex.
#[[rules]]
#pattern = "text-slate-400"
#replacement = "text-slate-600 dark:text-slate-400"
#unless-next = 'rounded\S*'

#[[cleanup]]
#pattern = "text-slate-600 dark:text-slate-600 dark:text-slate-400"
#replacement = "text-slate-600 dark:text-slate-400"

# Overrides run last, only on class strings where every marker matches a token.
#[[overrides]]
#name = "badge"
#markers = ["badge-\\S+"]
#pattern = "text-gray-900 dark:text-white"
#replacement = "text-white"
"#
}
