//! Class string rewriting for themefix.
//!
//! This module handles:
//! - Compiling token-window rules, overrides and the themed predicate
//! - Locating class strings in markup and rewriting them token by token

pub mod matcher;
pub mod rewriter;

pub use matcher::{CompiledOverride, CompiledRule, RuleSet, compile_rules};
pub use rewriter::{ClassLocator, ClassTokens, Rewrite, rewrite, rewrite_class_string};
