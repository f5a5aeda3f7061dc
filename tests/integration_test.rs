#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary project directory with its own empty HOME.
struct Project {
	dir: TempDir,
	home: TempDir,
}

impl Project {
	fn new() -> Self {
		Self {
			dir: tempfile::tempdir().unwrap(),
			home: tempfile::tempdir().unwrap(),
		}
	}

	fn path(&self) -> &Path {
		self.dir.path()
	}

	fn write(&self, relative: &str, content: &str) {
		let path = self.path().join(relative);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, content).unwrap();
	}

	fn read(&self, relative: &str) -> String {
		fs::read_to_string(self.path().join(relative)).unwrap()
	}

	fn cmd(&self) -> assert_cmd::Command {
		let mut cmd = assert_cmd::Command::cargo_bin("themefix").unwrap();
		cmd.current_dir(self.path())
			.env("HOME", self.home.path())
			.env_remove("RUST_LOG");
		cmd
	}
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let project = Project::new();
	project
		.cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Pair light and dark theme utility classes",
		));
}

#[test]
fn test_version_flag() {
	let project = Project::new();
	project
		.cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("themefix"));
}

#[test]
fn test_unknown_profile_rejected() {
	let project = Project::new();
	project
		.cmd()
		.args(["--profile", "solarized"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("unknown profile"));
}

// ============================================================================
// Default run (all-themes profile)
// ============================================================================

#[test]
fn test_no_args_with_empty_project() {
	let project = Project::new();
	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("Found 0 files to check..."))
		.stdout(predicate::str::contains("Fixed: 0 files"));
}

#[test]
fn test_default_run_rewrites_tsx_files() {
	let project = Project::new();
	project.write(
		"src/app/page.tsx",
		r#"<div className="bg-white/5 border-white/10"><h1 className="text-white">Hi</h1></div>"#,
	);
	project.write("src/app/plain.tsx", r#"<div className="px-4" />"#);
	project.write("src/app/styles.css", ".x { color: white; }");
	project.write(
		"src/node_modules/pkg/index.tsx",
		r#"<div className="text-white" />"#,
	);

	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("Found 2 files to check..."))
		.stdout(predicate::str::contains("[FIXED] src/app/page.tsx"))
		.stdout(predicate::str::contains("Fixed: 1 files"))
		.stdout(predicate::str::contains(
			"Skipped: 1 files (no changes needed)",
		))
		.stdout(predicate::str::contains("Fixed files:\n  - src/app/page.tsx"));

	assert_eq!(
		project.read("src/app/page.tsx"),
		r#"<div className="bg-white dark:bg-white/5 border-gray-200 dark:border-white/10"><h1 className="text-gray-900 dark:text-white">Hi</h1></div>"#
	);
	assert_eq!(
		project.read("src/node_modules/pkg/index.tsx"),
		r#"<div className="text-white" />"#
	);
}

#[test]
fn test_second_run_is_noop() {
	let project = Project::new();
	project.write(
		"src/page.tsx",
		r#"<p className="text-gray-400 hover:text-white">x</p>
<button className="bg-gradient-to-r text-white">Go</button>"#,
	);

	project.cmd().assert().success();
	let first = project.read("src/page.tsx");

	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: 0 files"));
	assert_eq!(project.read("src/page.tsx"), first);
	assert!(first.contains(r#"className="bg-gradient-to-r text-white""#));
}

#[test]
fn test_dry_run_does_not_write() {
	let project = Project::new();
	let original = r#"<p className="text-white">x</p>"#;
	project.write("src/page.tsx", original);

	project
		.cmd()
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicate::str::contains("[WOULD FIX] src/page.tsx"))
		.stdout(predicate::str::contains("Dry run"));

	assert_eq!(project.read("src/page.tsx"), original);
}

#[test]
fn test_run_subcommand_and_directory_flag() {
	let project = Project::new();
	project.write("web/src/page.tsx", r#"<p className="text-gray-300">x</p>"#);
	let other = tempfile::tempdir().unwrap();

	project
		.cmd()
		.current_dir(other.path())
		.args(["run", "-C"])
		.arg(project.path().join("web"))
		.assert()
		.success()
		.stdout(predicate::str::contains("[FIXED] src/page.tsx"));

	assert_eq!(
		project.read("web/src/page.tsx"),
		r#"<p className="text-gray-700 dark:text-gray-300">x</p>"#
	);
}

#[test]
fn test_already_themed_file_only_gets_cleanup() {
	let project = Project::new();
	project.write(
		"src/page.tsx",
		r#"<div className="bg-white dark:bg-white/5">
<h1 className="text-gray-900 dark:text-white">A</h1>
<span className="text-gray-400">B</span>
</div>"#,
	);

	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: 0 files"));
	assert!(project
		.read("src/page.tsx")
		.contains(r#"<span className="text-gray-400">B</span>"#));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_reported_and_run_continues() {
	let project = Project::new();
	project.write("src/a.tsx", r#"<p className="text-white">a</p>"#);
	fs::write(project.path().join("src/b.tsx"), [0xff, 0xfe, 0xfd]).unwrap();
	project.write("src/c.tsx", r#"<p className="text-white">c</p>"#);

	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("[ERROR] src/b.tsx: Failed to read file"))
		.stdout(predicate::str::contains("[FIXED] src/a.tsx"))
		.stdout(predicate::str::contains("[FIXED] src/c.tsx"))
		.stdout(predicate::str::contains("Errors: 1 files"));
}

// ============================================================================
// Pages profile (fixed list)
// ============================================================================

#[test]
fn test_pages_profile_reports_missing_and_continues() {
	let project = Project::new();
	project.write(
		"src/app/login/page.tsx",
		r#"<input className="bg-white/10 focus:ring-white/20" />"#,
	);
	project.write("src/app/register/page.tsx", r#"<div className="px-4" />"#);

	project
		.cmd()
		.args(["--profile", "pages"])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"[ERROR] src/app/admin/dashboard/page.tsx: File not found",
		))
		.stdout(predicate::str::contains("[FIXED] src/app/login/page.tsx"))
		.stdout(predicate::str::contains("[SKIPPED] src/app/register/page.tsx"))
		.stdout(predicate::str::contains("Fixed: 1 files"))
		.stdout(predicate::str::contains("Skipped: 1 files"))
		.stdout(predicate::str::contains("Errors: 20 files"));

	assert_eq!(
		project.read("src/app/login/page.tsx"),
		r#"<input className="bg-gray-50 dark:bg-white/10 focus:ring-gray-300 dark:focus:ring-white/20" />"#
	);
}

// ============================================================================
// Config file behavior
// ============================================================================

#[test]
fn test_config_list_selector_and_custom_rule() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
root = true
profile = "none"

[selector]
kind = "list"
files = ["views/a.html", "views/missing.html"]

[[rules]]
pattern = "text-slate-400"
replacement = "text-slate-600 dark:text-slate-400"
"#,
	);
	project.write("views/a.html", r#"<p class="text-slate-400 text-white">x</p>"#);

	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("[FIXED] views/a.html"))
		.stdout(predicate::str::contains(
			"[ERROR] views/missing.html: File not found",
		));

	assert_eq!(
		project.read("views/a.html"),
		r#"<p class="text-slate-600 dark:text-slate-400 text-white">x</p>"#
	);
}

#[test]
fn test_none_profile_without_selector_fails() {
	let project = Project::new();
	project.write(".themefix.toml", "root = true\nprofile = \"none\"\n");

	project
		.cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("No file selector configured"));
}

#[test]
fn test_invalid_rule_regex_fails_run() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
root = true

[[rules]]
pattern = "text-[oops"
replacement = "x"
"#,
	);

	project
		.cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid configuration in"))
		.stderr(predicate::str::contains(".themefix.toml"))
		.stderr(predicate::str::contains("Invalid regex pattern in rule: text-[oops"));
}

#[test]
fn test_user_config_applies() {
	let project = Project::new();
	fs::write(
		project.home.path().join(".themefix.toml"),
		r#"
[[rules]]
pattern = "text-zinc-400"
replacement = "text-zinc-600 dark:text-zinc-400"
"#,
	)
	.unwrap();
	project.write("src/page.tsx", r#"<p className="text-zinc-400">x</p>"#);

	project.cmd().assert().success();
	assert_eq!(
		project.read("src/page.tsx"),
		r#"<p className="text-zinc-600 dark:text-zinc-400">x</p>"#
	);
}

// ============================================================================
// init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let project = Project::new();

	project
		.cmd()
		.arg("init")
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .themefix.toml"));

	let content = project.read(".themefix.toml");
	assert!(content.contains("root = true"));
	assert!(content.contains("[[rules]]"));
}

#[test]
fn test_init_adds_no_rules_of_its_own() {
	let project = Project::new();
	let page = r#"<p className="text-slate-400 px-2">x</p>"#;
	project.write("src/page.tsx", page);

	project.cmd().arg("init").assert().success();
	project
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: 0 files"));

	assert_eq!(project.read("src/page.tsx"), page);
}

#[test]
fn test_init_fails_if_exists() {
	let project = Project::new();
	project.write(".themefix.toml", "# existing");

	project
		.cmd()
		.arg("init")
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let project = Project::new();
	project.write(".themefix.toml", "# existing");

	project.cmd().args(["init", "--force"]).assert().success();

	assert!(project.read(".themefix.toml").contains("root = true"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let project = Project::new();
	project
		.cmd()
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
root = true

[[rules]]
pattern = "text-slate-400"
replacement = "text-slate-600 dark:text-slate-400"
"#,
	);

	project
		.cmd()
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"))
		.stdout(predicate::str::contains("(1 rules, 0 cleanup, 0 overrides)"));
}

#[test]
fn test_relative_directory_loads_config_once() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
[[rules]]
pattern = "text-slate-400"
replacement = "text-slate-600 dark:text-slate-400"
"#,
	);

	let output = project
		.cmd()
		.args(["-C", ".", "config", "validate"])
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	let stdout = String::from_utf8(output).unwrap();
	assert_eq!(stdout.matches("(1 rules, 0 cleanup, 0 overrides)").count(), 1);

	project.write("src/page.tsx", r#"<p className="text-slate-400">x</p>"#);
	project.cmd().args(["-C", "."]).assert().success();
	assert_eq!(
		project.read("src/page.tsx"),
		r#"<p className="text-slate-600 dark:text-slate-400">x</p>"#
	);
}

#[test]
fn test_config_validate_invalid_toml() {
	let project = Project::new();
	project.write(".themefix.toml", "invalid toml [[[");

	project
		.cmd()
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_validate_invalid_regex() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
root = true

[[overrides]]
markers = ["(unclosed"]
pattern = "text-gray-900 dark:text-white"
replacement = "text-white"
"#,
	);

	project
		.cmd()
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid regex pattern"));
}

#[test]
fn test_config_show_displays_effective_rules() {
	let project = Project::new();
	project.write(
		".themefix.toml",
		r#"
root = true
profile = "pages"

[[rules]]
pattern = "text-slate-400"
replacement = "text-slate-600 dark:text-slate-400"
"#,
	);

	project
		.cmd()
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("# profile: pages"))
		.stdout(predicate::str::contains("Effective settings (profile: pages)"))
		.stdout(predicate::str::contains("selector: list of 22 files"))
		.stdout(predicate::str::contains(
			"text-slate-400 => text-slate-600 dark:text-slate-400",
		))
		.stdout(predicate::str::contains("[gradient]"));
}
