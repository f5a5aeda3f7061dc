//! Built-in profiles.
//!
//! Each table is an ordered list of token-window rules; order matters because
//! later rules see the tokens produced by earlier ones.

use crate::config::types::{OverrideSpec, ProfileName, ProfileSpec, RuleSpec, SelectorSpec};
use std::path::PathBuf;

/// Pairing rules of the `all-themes` profile.
const ALL_THEMES_RULES: &[(&str, &str)] = &[
	// Text colors
	("text-white", "text-gray-900 dark:text-white"),
	("text-gray-400", "text-gray-600 dark:text-gray-400"),
	("text-gray-300", "text-gray-700 dark:text-gray-300"),
	("text-gray-500", "text-gray-600 dark:text-gray-500"),
	// Backgrounds
	("bg-white/5", "bg-white dark:bg-white/5"),
	("bg-white/10", "bg-gray-50 dark:bg-white/10"),
	("bg-black/20", "bg-white dark:bg-black/20"),
	("bg-black/80", "bg-white dark:bg-black/80"),
	// Borders
	("border-white/10", "border-gray-200 dark:border-white/10"),
	("border-white/20", "border-gray-300 dark:border-white/20"),
	// Hover states
	("hover:bg-white/10", "hover:bg-gray-100 dark:hover:bg-white/10"),
	("hover:bg-white/20", "hover:bg-gray-200 dark:hover:bg-white/20"),
	("hover:text-white", "hover:text-gray-900 dark:hover:text-white"),
	// Placeholders
	(
		"placeholder-gray-400",
		"placeholder-gray-500 dark:placeholder-gray-400",
	),
];

/// Cleanup rules of the `all-themes` profile. These are the only rules run on
/// files that are already themed.
const ALL_THEMES_CLEANUP: &[(&str, &str)] = &[
	(r"(\S*?)(?:dark:){2,}(\S*)", "${1}dark:${2}"),
	(
		"text-gray-900 dark:text-gray-900 dark:text-white",
		"text-gray-900 dark:text-white",
	),
	(
		"text-gray-600 dark:text-gray-600 dark:text-gray-400",
		"text-gray-600 dark:text-gray-400",
	),
	(
		"bg-white dark:bg-white dark:bg-white/5",
		"bg-white dark:bg-white/5",
	),
	(
		"border-gray-200 dark:border-gray-200 dark:border-white/10",
		"border-gray-200 dark:border-white/10",
	),
];

/// Markers whose joint presence means a file was already migrated.
const ALL_THEMES_MARKERS: &[&str] = &["dark:text-white", "dark:bg-white/5"];

/// Pairing rules of the `pages` profile.
const PAGES_RULES: &[(&str, &str)] = &[
	// Backgrounds go first so text rules never see half-migrated strings
	("bg-white/5", "bg-white dark:bg-white/5"),
	("bg-white/10", "bg-gray-50 dark:bg-white/10"),
	("bg-white/20", "bg-gray-100 dark:bg-white/20"),
	("bg-black/20", "bg-gray-100 dark:bg-black/20"),
	("bg-black/80", "bg-white dark:bg-black/80"),
	// Borders
	("border-white/10", "border-gray-200 dark:border-white/10"),
	("border-white/20", "border-gray-300 dark:border-white/20"),
	("border-white/5", "border-gray-100 dark:border-white/5"),
	// Text colors
	("text-white", "text-gray-900 dark:text-white"),
	("text-gray-400", "text-gray-600 dark:text-gray-400"),
	("text-gray-300", "text-gray-700 dark:text-gray-300"),
	("text-gray-200", "text-gray-800 dark:text-gray-200"),
	// Placeholders
	(
		"placeholder-gray-400",
		"placeholder-gray-500 dark:placeholder-gray-400",
	),
	(
		"placeholder-white/60",
		"placeholder-gray-500 dark:placeholder-white/60",
	),
	// Hover states
	("hover:bg-white/10", "hover:bg-gray-100 dark:hover:bg-white/10"),
	("hover:bg-white/20", "hover:bg-gray-200 dark:hover:bg-white/20"),
	("hover:bg-white/5", "hover:bg-gray-50 dark:hover:bg-white/5"),
	("hover:text-white", "hover:text-gray-900 dark:hover:text-white"),
	(
		"hover:border-white/20",
		"hover:border-gray-300 dark:hover:border-white/20",
	),
	// Focus states
	(
		"focus:border-white/40",
		"focus:border-gray-400 dark:focus:border-white/40",
	),
	(
		"focus:ring-white/20",
		"focus:ring-gray-300 dark:focus:ring-white/20",
	),
];

/// Page files rewritten by the `pages` profile, in processing order.
const PAGES_FILES: &[&str] = &[
	"src/app/admin/dashboard/page.tsx",
	"src/app/admin/employees/page.tsx",
	"src/app/admin/tariffs/page.tsx",
	"src/app/admin/reports/page.tsx",
	"src/app/admin/analytics/page.tsx",
	"src/app/admin/profile/page.tsx",
	"src/app/admin/settings/page.tsx",
	"src/app/employee/dashboard/page.tsx",
	"src/app/employee/meter-reading/page.tsx",
	"src/app/employee/customers/page.tsx",
	"src/app/employee/bill-generation/page.tsx",
	"src/app/employee/profile/page.tsx",
	"src/app/employee/settings/page.tsx",
	"src/app/customer/bills/page.tsx",
	"src/app/customer/payment/page.tsx",
	"src/app/customer/profile/page.tsx",
	"src/app/customer/services/page.tsx",
	"src/app/customer/new-connection/page.tsx",
	"src/app/customer/notifications/page.tsx",
	"src/app/login/page.tsx",
	"src/app/register/page.tsx",
	"src/app/forgot-password/page.tsx",
];

const DEFAULT_ATTRIBUTES: &[&str] = &["className", "class"];

const WALK_EXCLUDE: &[&str] = &["node_modules", ".next", "dist"];

/// Tokens that mark white text as button styling in the `pages` profile.
const BUTTON_STYLING: &str = r"(?:rounded|font|transition)\S*";

/// The pair restored to plain white on surfaces that are dark in both themes.
const WHITE_PAIR: &str = "text-gray-900 dark:text-white";

fn rules(table: &[(&str, &str)]) -> Vec<RuleSpec> {
	table
		.iter()
		.map(|(pattern, replacement)| RuleSpec::new(*pattern, *replacement))
		.collect()
}

/// The page table, with white text left alone when button styling follows it.
fn pages_rules() -> Vec<RuleSpec> {
	rules(PAGES_RULES)
		.into_iter()
		.map(|rule| {
			if rule.pattern == "text-white" {
				rule.unless_next(BUTTON_STYLING)
			} else {
				rule
			}
		})
		.collect()
}

fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

/// Overrides shared by both built-in profiles: gradient buttons and
/// fixed-size icons keep white text whatever the rules paired them with.
pub fn default_overrides() -> Vec<OverrideSpec> {
	vec![
		OverrideSpec {
			name: Some("gradient".to_string()),
			markers: strings(&[r"bg-gradient-to-\S+"]),
			pattern: WHITE_PAIR.to_string(),
			replacement: "text-white".to_string(),
		},
		OverrideSpec {
			name: Some("icon".to_string()),
			markers: strings(&[r"w-\d+", r"h-\d+"]),
			pattern: WHITE_PAIR.to_string(),
			replacement: "text-white".to_string(),
		},
	]
}

/// Build the settings of a built-in profile.
pub fn profile(name: ProfileName) -> ProfileSpec {
	match name {
		ProfileName::AllThemes => ProfileSpec {
			selector: Some(SelectorSpec::Walk {
				root: PathBuf::from("src"),
				extensions: strings(&["tsx"]),
				exclude: strings(WALK_EXCLUDE),
			}),
			rules: rules(ALL_THEMES_RULES),
			cleanup: rules(ALL_THEMES_CLEANUP),
			overrides: default_overrides(),
			themed_markers: strings(ALL_THEMES_MARKERS),
			attributes: strings(DEFAULT_ATTRIBUTES),
			show_skipped: false,
		},
		ProfileName::Pages => ProfileSpec {
			selector: Some(SelectorSpec::List {
				files: PAGES_FILES.iter().map(PathBuf::from).collect(),
			}),
			rules: pages_rules(),
			cleanup: Vec::new(),
			overrides: default_overrides(),
			themed_markers: Vec::new(),
			attributes: strings(DEFAULT_ATTRIBUTES),
			show_skipped: true,
		},
		ProfileName::Empty => ProfileSpec {
			attributes: strings(DEFAULT_ATTRIBUTES),
			..Default::default()
		},
	}
}
