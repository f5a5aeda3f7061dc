//! Run execution for themefix.
//!
//! This module handles:
//! - Reading, rewriting and conditionally writing back one file
//! - Driving a whole run over the selected candidates
//! - Containing per-file failures so they never stop the run

use crate::error::{Result, ThemefixError};
use crate::report::{Reporter, Summary};
use crate::rules::{RuleSet, rewrite};
use crate::select::Candidate;
use std::io::{self, Write};
use std::path::Path;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Fixed,
	Skipped,
	Error(String),
}

/// Options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
	/// Compute outcomes without writing any file.
	pub dry_run: bool,
}

/// Rewrite one file in place.
///
/// Returns whether the content changed. The file is only written when it
/// changed and `write` is true.
pub fn process_file(path: &Path, rules: &RuleSet, write: bool) -> Result<bool> {
	let content = std::fs::read_to_string(path).map_err(|source| ThemefixError::FileReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let result = rewrite(&content, rules);
	tracing::debug!(
		path = %path.display(),
		themed = result.themed,
		changed = result.changed,
		"rewrote file"
	);

	if result.changed && write {
		std::fs::write(path, &result.content).map_err(|source| ThemefixError::FileWriteError {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::info!(path = %path.display(), "wrote file");
	}

	Ok(result.changed)
}

/// Resolve the outcome for one candidate, turning failures into `Outcome::Error`.
pub fn process_candidate(candidate: &Candidate, rules: &RuleSet, options: RunOptions) -> Outcome {
	let result = if candidate.exists {
		process_file(&candidate.path, rules, !options.dry_run)
	} else {
		Err(ThemefixError::FileNotFound {
			path: candidate.path.clone(),
		})
	};

	match result {
		Ok(true) => Outcome::Fixed,
		Ok(false) => Outcome::Skipped,
		Err(e) => {
			let message = error_message(&e);
			tracing::warn!(path = %candidate.display.display(), error = %message, "failed to process file");
			Outcome::Error(message)
		}
	}
}

/// Error text including the underlying cause.
fn error_message(error: &ThemefixError) -> String {
	match std::error::Error::source(error) {
		Some(source) => format!("{}: {}", error, source),
		None => error.to_string(),
	}
}

/// Process every candidate in order and report each outcome.
///
/// Only output failures abort the run; file failures are recorded.
pub fn run<W: Write>(
	candidates: &[Candidate],
	rules: &RuleSet,
	options: RunOptions,
	reporter: &mut Reporter<W>,
) -> io::Result<Summary> {
	reporter.start(candidates.len())?;

	for candidate in candidates {
		match process_candidate(candidate, rules, options) {
			Outcome::Fixed => reporter.fixed(&candidate.display)?,
			Outcome::Skipped => reporter.skipped(&candidate.display)?,
			Outcome::Error(message) => reporter.error(&candidate.display, &message)?,
		}
	}

	reporter.finish()
}
