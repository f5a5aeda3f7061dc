//! Themefix - pair light and dark theme utility classes in markup files.
//!
//! This library provides the core functionality for themefix, including:
//! - Built-in profiles and configuration file cascade discovery
//! - Token-level class string rewriting with cleanup and override rules
//! - File selection by directory walk or fixed list
//! - Run execution and reporting
//!
//! # Example
//!
//! ```no_run
//! use themefix::config::load_merged_config;
//! use themefix::rules::{compile_rules, rewrite};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(&cwd).unwrap();
//! let rules = compile_rules(&config.resolve(None)).unwrap();
//!
//! let result = rewrite(r#"<p className="text-white">Hi</p>"#, &rules);
//! assert_eq!(result.content, r#"<p className="text-gray-900 dark:text-white">Hi</p>"#);
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod report;
pub mod rules;
pub mod select;

pub use error::{Result, ThemefixError};
