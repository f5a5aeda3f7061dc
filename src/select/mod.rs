//! Candidate file selection for themefix.
//!
//! Two strategies, picked by configuration:
//! - a recursive directory walk filtered by extension
//! - a fixed list of paths, each checked for existence

use crate::config::types::SelectorSpec;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file the run should look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	/// Path used for reading and writing.
	pub path: PathBuf,

	/// Path as shown in the report, relative to the base directory.
	pub display: PathBuf,

	/// False when a listed path does not exist.
	pub exists: bool,
}

/// Produces the ordered candidate list for a run.
#[derive(Debug, Clone)]
pub enum FileSelector {
	Walk {
		root: PathBuf,
		extensions: Vec<String>,
		exclude: Vec<String>,
	},
	List {
		files: Vec<PathBuf>,
	},
}

impl From<&SelectorSpec> for FileSelector {
	fn from(spec: &SelectorSpec) -> Self {
		match spec {
			SelectorSpec::Walk {
				root,
				extensions,
				exclude,
			} => FileSelector::Walk {
				root: root.clone(),
				extensions: extensions
					.iter()
					.map(|e| e.trim_start_matches('.').to_string())
					.collect(),
				exclude: exclude.clone(),
			},
			SelectorSpec::List { files } => FileSelector::List {
				files: files.clone(),
			},
		}
	}
}

impl FileSelector {
	/// Resolve candidates against `base`.
	pub fn select(&self, base: &Path) -> Vec<Candidate> {
		match self {
			FileSelector::Walk {
				root,
				extensions,
				exclude,
			} => walk(base, root, extensions, exclude),
			FileSelector::List { files } => files
				.iter()
				.map(|file| {
					let path = base.join(file);
					let exists = path.is_file();
					Candidate {
						path,
						display: file.clone(),
						exists,
					}
				})
				.collect(),
		}
	}
}

fn walk(base: &Path, root: &Path, extensions: &[String], exclude: &[String]) -> Vec<Candidate> {
	let start = base.join(root);
	if !start.is_dir() {
		tracing::warn!(root = %start.display(), "walk root is not a directory");
		return Vec::new();
	}

	WalkDir::new(&start)
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|entry| {
			entry.depth() == 0
				|| !entry.file_type().is_dir()
				|| !exclude
					.iter()
					.any(|name| entry.file_name().to_string_lossy() == name.as_str())
		})
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(e) => {
				tracing::warn!(error = %e, "skipping unreadable entry");
				None
			}
		})
		.filter(|entry| entry.file_type().is_file())
		.filter(|entry| has_extension(entry.path(), extensions))
		.map(|entry| {
			let path = entry.into_path();
			let display = path.strip_prefix(base).unwrap_or(&path).to_path_buf();
			Candidate {
				path,
				display,
				exists: true,
			}
		})
		.collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
	if extensions.is_empty() {
		return true;
	}
	path.extension()
		.is_some_and(|ext| extensions.iter().any(|e| ext == e.as_str()))
}
