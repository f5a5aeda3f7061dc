use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use themefix::ThemefixError;
use themefix::config::{
	CONFIG_FILE_NAME, ProfileName, ProfileSpec, RuleSpec, SelectorSpec, discover_configs,
	generate_init_template, merge_configs, user_config_path,
};
use themefix::exec::{RunOptions, run};
use themefix::logging::init_logging;
use themefix::report::Reporter;
use themefix::rules::compile_rules;
use themefix::select::FileSelector;

#[derive(Parser)]
#[command(name = "themefix")]
#[command(
	author,
	version,
	about = "Pair light and dark theme utility classes in markup files"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Run as if started in DIR
	#[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
	directory: Option<PathBuf>,

	/// Print more diagnostics on stderr (repeat for more)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(flatten)]
	run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
	/// Built-in profile: all-themes, pages or none
	#[arg(long, value_name = "NAME")]
	profile: Option<ProfileName>,

	/// Report what would change without writing files
	#[arg(long)]
	dry_run: bool,

	/// Print a line for files that need no change
	#[arg(long)]
	show_skipped: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite the selected files (the default when no command is given)
	Run(RunArgs),
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
	/// Create a template .themefix.toml
	Init {
		/// Overwrite an existing .themefix.toml
		#[arg(long)]
		force: bool,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered config files and the effective rule set
	Show {
		/// Resolve against this profile instead of the configured one
		#[arg(long, value_name = "NAME")]
		profile: Option<ProfileName>,
	},
	/// Check all config files and rules for errors without rewriting anything
	Validate,
}

fn main() -> ExitCode {
	match run_cli() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run_cli() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let base = match cli.directory {
		Some(dir) => dir,
		None => std::env::current_dir().context("Failed to get current directory")?,
	};

	match cli.command {
		Some(Commands::Run(args)) => handle_run(&base, &args),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show { profile } => handle_config_show(&base, profile),
			ConfigAction::Validate => handle_config_validate(&base),
		},
		Some(Commands::Init { force }) => handle_init(&base, force),
		None => handle_run(&base, &cli.run),
	}
}

fn load_profile(base: &Path, profile: Option<ProfileName>) -> Result<ProfileSpec> {
	let configs = discover_configs(base).context("Failed to load configuration")?;
	Ok(merge_configs(&configs).resolve(profile))
}

fn handle_run(base: &Path, args: &RunArgs) -> Result<ExitCode> {
	let mut spec = load_profile(base, args.profile)?;
	if args.show_skipped {
		spec.show_skipped = true;
	}

	let rules = compile_rules(&spec).context("Failed to compile rules")?;
	let selector = spec
		.selector
		.as_ref()
		.map(FileSelector::from)
		.ok_or(ThemefixError::NoSelector)?;

	let candidates = selector.select(base);
	tracing::info!(
		base = %base.display(),
		candidates = candidates.len(),
		rules = rules.len(),
		"starting run"
	);

	let stdout = std::io::stdout();
	let mut reporter = Reporter::new(stdout.lock(), spec.show_skipped, args.dry_run);
	let options = RunOptions {
		dry_run: args.dry_run,
	};
	run(&candidates, &rules, options, &mut reporter).context("Failed to write report")?;

	Ok(ExitCode::SUCCESS)
}

fn handle_init(base: &Path, force: bool) -> Result<ExitCode> {
	let config_path = base.join(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", CONFIG_FILE_NAME);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(base: &Path, profile: Option<ProfileName>) -> Result<ExitCode> {
	let configs = discover_configs(base).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.\n");
	} else {
		println!("Configuration files (in cascade order):\n");
	}

	for loaded in &configs {
		let config = &loaded.config;
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", config.root);
		println!("# no-external-lookup: {}", config.no_external_lookup);
		if let Some(profile) = config.profile {
			println!("# profile: {}", profile);
		}
		if let Some(ref markers) = config.themed_markers {
			println!("# themed-markers: {}", markers.join(", "));
		}
		if let Some(ref attributes) = config.attributes {
			println!("# attributes: {}", attributes.join(", "));
		}
		if let Some(show) = config.show_skipped {
			println!("# show-skipped: {}", show);
		}
		if let Some(ref selector) = config.selector {
			println!("# selector: {}", describe_selector(selector));
		}
		println!(
			"# rules: {}, cleanup: {}, overrides: {}",
			config.rules.len(),
			config.cleanup.len(),
			config.overrides.len()
		);
		println!();
	}

	let merged = merge_configs(&configs);
	let name = profile.or(merged.profile).unwrap_or(ProfileName::AllThemes);
	let spec = merged.resolve(profile);

	println!("Effective settings (profile: {}):\n", name);
	match spec.selector {
		Some(ref selector) => println!("  selector: {}", describe_selector(selector)),
		None => println!("  selector: (none)"),
	}
	println!("  attributes: {}", spec.attributes.join(", "));
	if spec.themed_markers.is_empty() {
		println!("  themed-markers: (none)");
	} else {
		println!("  themed-markers: {}", spec.themed_markers.join(", "));
	}
	println!("  show-skipped: {}", spec.show_skipped);
	println!();

	println!("  Rules:");
	for (i, rule) in spec.rules.iter().enumerate() {
		println!("    {:>2}. {}", i + 1, describe_rule(rule));
	}
	println!("  Cleanup rules:");
	for (i, rule) in spec.cleanup.iter().enumerate() {
		println!("    {:>2}. {}", i + 1, describe_rule(rule));
	}
	println!("  Overrides:");
	for (i, o) in spec.overrides.iter().enumerate() {
		println!(
			"    {:>2}. [{}] when {}: {} => {}",
			i + 1,
			o.label(),
			o.markers.join(" & "),
			o.pattern,
			o.replacement
		);
	}
	println!();

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn describe_rule(rule: &RuleSpec) -> String {
	match rule.unless_next {
		Some(ref next) => format!(
			"{} => {} (unless next: {})",
			rule.pattern, rule.replacement, next
		),
		None => format!("{} => {}", rule.pattern, rule.replacement),
	}
}

fn describe_selector(selector: &SelectorSpec) -> String {
	match selector {
		SelectorSpec::Walk {
			root,
			extensions,
			exclude,
		} => format!(
			"walk {} (extensions: {}; exclude: {})",
			root.display(),
			extensions.join(", "),
			exclude.join(", ")
		),
		SelectorSpec::List { files } => format!("list of {} files", files.len()),
	}
}

fn handle_config_validate(base: &Path) -> Result<ExitCode> {
	let configs = match discover_configs(base) {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {:#}", anyhow::Error::new(e));
			return Ok(ExitCode::FAILURE);
		}
	};

	let spec = merge_configs(&configs).resolve(None);
	if let Err(e) = compile_rules(&spec) {
		eprintln!("Configuration error: {:#}", anyhow::Error::new(e));
		return Ok(ExitCode::FAILURE);
	}

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("All configuration files are valid:");
		for loaded in &configs {
			println!(
				"  {} ({} rules, {} cleanup, {} overrides)",
				loaded.path.display(),
				loaded.config.rules.len(),
				loaded.config.cleanup.len(),
				loaded.config.overrides.len()
			);
		}
	}

	Ok(ExitCode::SUCCESS)
}
