use crate::config::types::{OverrideSpec, ProfileSpec, RuleSpec};
use crate::error::{Result, ThemefixError};
use crate::rules::rewriter::ClassLocator;
use regex::Regex;

/// A compiled token-window rule ready for matching.
#[derive(Debug)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: RuleSpec,

	/// Whole-window regex, anchored at both ends.
	regex: Regex,

	/// Number of tokens the pattern spans.
	width: usize,

	/// Matches the token that must not follow a window for it to be rewritten.
	unless_next: Option<Regex>,
}

impl CompiledRule {
	/// Compile a rule. Space-separated parts of the pattern each match one token.
	pub fn compile(rule: &RuleSpec) -> Result<Self> {
		rule.validate()?;

		let parts: Vec<&str> = rule.pattern.split_whitespace().collect();
		let regex = compile_anchored(&parts.join(" "), &rule.pattern)?;
		let unless_next = rule
			.unless_next
			.as_deref()
			.map(|next| compile_anchored(next, next))
			.transpose()?;

		Ok(CompiledRule {
			rule: rule.clone(),
			regex,
			width: parts.len(),
			unless_next,
		})
	}

	pub fn width(&self) -> usize {
		self.width
	}

	/// True when `next`, the token after a window, rules the window out.
	pub fn blocked_by(&self, next: Option<&str>) -> bool {
		match (&self.unless_next, next) {
			(Some(guard), Some(token)) => guard.is_match(token),
			_ => false,
		}
	}

	/// If `window` matches, return the replacement tokens.
	///
	/// `window` must hold exactly `width()` tokens.
	pub fn rewrite_window(&self, window: &[String]) -> Option<Vec<String>> {
		let joined = window.join(" ");
		let caps = self.regex.captures(&joined)?;

		let mut expanded = String::new();
		caps.expand(&self.rule.replacement, &mut expanded);

		Some(expanded.split_whitespace().map(|s| s.to_string()).collect())
	}
}

/// A compiled override: a rule gated on marker tokens.
#[derive(Debug)]
pub struct CompiledOverride {
	pub spec: OverrideSpec,
	markers: Vec<Regex>,
	pub rule: CompiledRule,
}

impl CompiledOverride {
	pub fn compile(spec: &OverrideSpec) -> Result<Self> {
		spec.validate()?;

		let markers = spec
			.markers
			.iter()
			.map(|m| compile_anchored(m, m))
			.collect::<Result<Vec<_>>>()?;

		Ok(CompiledOverride {
			spec: spec.clone(),
			markers,
			rule: CompiledRule::compile(&spec.rule())?,
		})
	}

	/// True when every marker matches at least one token.
	pub fn applies_to(&self, tokens: &[String]) -> bool {
		self.markers
			.iter()
			.all(|marker| tokens.iter().any(|t| marker.is_match(t)))
	}
}

/// A fully compiled rule set: the engine's only input besides content.
#[derive(Debug)]
pub struct RuleSet {
	/// Full-only rules, run before `cleanup` on files that are not yet themed.
	pub rules: Vec<CompiledRule>,

	/// Trailing cleanup rules, the only ones run on already-themed files.
	pub cleanup: Vec<CompiledRule>,

	/// Marker-gated rules run after the sequence on every class string.
	pub overrides: Vec<CompiledOverride>,

	/// Substrings that together mark content as already themed.
	pub themed_markers: Vec<String>,

	/// Finds class strings in markup.
	pub locator: ClassLocator,
}

impl RuleSet {
	pub fn compile(spec: &ProfileSpec) -> Result<Self> {
		let rules = spec
			.rules
			.iter()
			.map(CompiledRule::compile)
			.collect::<Result<Vec<_>>>()?;
		let cleanup = spec
			.cleanup
			.iter()
			.map(CompiledRule::compile)
			.collect::<Result<Vec<_>>>()?;
		let overrides = spec
			.overrides
			.iter()
			.map(CompiledOverride::compile)
			.collect::<Result<Vec<_>>>()?;

		Ok(RuleSet {
			rules,
			cleanup,
			overrides,
			themed_markers: spec.themed_markers.clone(),
			locator: ClassLocator::new(&spec.attributes)?,
		})
	}

	/// Content is already themed when it contains every marker.
	/// An empty marker list never short-circuits.
	pub fn is_themed(&self, content: &str) -> bool {
		!self.themed_markers.is_empty()
			&& self
				.themed_markers
				.iter()
				.all(|marker| content.contains(marker.as_str()))
	}

	/// The rule sequence for content, given whether it is already themed.
	pub fn selected(&self, themed: bool) -> Box<dyn Iterator<Item = &CompiledRule> + '_> {
		if themed {
			Box::new(self.cleanup.iter())
		} else {
			Box::new(self.rules.iter().chain(self.cleanup.iter()))
		}
	}

	pub fn len(&self) -> usize {
		self.rules.len() + self.cleanup.len() + self.overrides.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Compile a regex that must match the whole input.
fn compile_anchored(pattern: &str, original: &str) -> Result<Regex> {
	Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| ThemefixError::InvalidRegex {
		pattern: original.to_string(),
		source,
	})
}

/// Compile a profile into a rule set.
pub fn compile_rules(spec: &ProfileSpec) -> Result<RuleSet> {
	RuleSet::compile(spec)
}
