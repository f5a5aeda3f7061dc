//! Progress and summary output for a run.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

const RULE: &str = "--------------------------------------------------";

/// Final counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub fixed: usize,
	pub skipped: usize,
	pub errors: usize,
}

/// Collects per-file outcomes and prints them as they arrive.
///
/// The three lists are disjoint and append-only.
pub struct Reporter<W: Write> {
	out: W,
	show_skipped: bool,
	dry_run: bool,
	fixed: Vec<PathBuf>,
	skipped: Vec<PathBuf>,
	errors: Vec<(PathBuf, String)>,
}

impl<W: Write> Reporter<W> {
	pub fn new(out: W, show_skipped: bool, dry_run: bool) -> Self {
		Self {
			out,
			show_skipped,
			dry_run,
			fixed: Vec::new(),
			skipped: Vec::new(),
			errors: Vec::new(),
		}
	}

	pub fn start(&mut self, total: usize) -> io::Result<()> {
		writeln!(self.out, "Found {} files to check...", total)?;
		writeln!(self.out, "{}", RULE)
	}

	pub fn fixed(&mut self, path: &Path) -> io::Result<()> {
		let tag = if self.dry_run { "WOULD FIX" } else { "FIXED" };
		writeln!(self.out, "[{}] {}", tag, path.display())?;
		self.fixed.push(path.to_path_buf());
		Ok(())
	}

	pub fn skipped(&mut self, path: &Path) -> io::Result<()> {
		if self.show_skipped {
			writeln!(self.out, "[SKIPPED] {}", path.display())?;
		}
		self.skipped.push(path.to_path_buf());
		Ok(())
	}

	pub fn error(&mut self, path: &Path, message: &str) -> io::Result<()> {
		writeln!(self.out, "[ERROR] {}: {}", path.display(), message)?;
		self.errors.push((path.to_path_buf(), message.to_string()));
		Ok(())
	}

	pub fn summary(&self) -> Summary {
		Summary {
			fixed: self.fixed.len(),
			skipped: self.skipped.len(),
			errors: self.errors.len(),
		}
	}

	/// Print the tally and, if anything was fixed, the fixed files again.
	pub fn finish(&mut self) -> io::Result<Summary> {
		let summary = self.summary();

		writeln!(self.out, "{}", RULE)?;
		writeln!(self.out, "\nSummary:")?;
		writeln!(self.out, "  Fixed: {} files", summary.fixed)?;
		writeln!(
			self.out,
			"  Skipped: {} files (no changes needed)",
			summary.skipped
		)?;
		writeln!(self.out, "  Errors: {} files", summary.errors)?;

		if self.dry_run {
			writeln!(self.out, "\nDry run: no files were written.")?;
		}

		if !self.fixed.is_empty() {
			let heading = if self.dry_run {
				"Files that would be fixed"
			} else {
				"Fixed files"
			};
			writeln!(self.out, "\n{}:", heading)?;
			for path in &self.fixed {
				writeln!(self.out, "  - {}", path.display())?;
			}
		}

		self.out.flush()?;
		Ok(summary)
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}
