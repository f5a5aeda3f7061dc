use crate::error::{Result, ThemefixError};
use crate::rules::matcher::{CompiledRule, RuleSet};
use regex::{Captures, Regex};

/// Capture group names holding the class string, one per quoting style.
const VALUE_GROUPS: &[&str] = &["dq", "sq", "bt", "bdq", "bsq"];

/// Quote and brace characters peeled off tokens inside template literals.
const PUNCTUATION: &[char] = &['\'', '"', '`', '{', '}'];

/// Finds class attribute values in markup.
///
/// Recognized forms: `attr="..."`, `attr='...'`, ``attr={`...`}``,
/// `attr={"..."}` and `attr={'...'}`. The name must start the input or follow
/// whitespace, `{` or `(`, so `data-class` is not a class attribute.
#[derive(Debug)]
pub struct ClassLocator {
	regex: Regex,
}

impl ClassLocator {
	pub fn new(attributes: &[String]) -> Result<Self> {
		if attributes.is_empty() {
			return Err(ThemefixError::InvalidRule {
				pattern: "attributes".to_string(),
				reason: "at least one class attribute name is required".to_string(),
			});
		}

		let names = attributes
			.iter()
			.map(|a| regex::escape(a.trim()))
			.collect::<Vec<_>>()
			.join("|");
		let pattern = format!(
			r#"(?:^|[\s{{(])(?:{names})\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|\{{\s*`(?P<bt>[^`]*)`\s*\}}|\{{\s*"(?P<bdq>[^"]*)"\s*\}}|\{{\s*'(?P<bsq>[^']*)'\s*\}})"#
		);

		let regex = Regex::new(&pattern).map_err(|source| ThemefixError::InvalidRegex {
			pattern: names,
			source,
		})?;

		Ok(ClassLocator { regex })
	}
}

fn class_value<'c>(caps: &Captures<'c>) -> Option<regex::Match<'c>> {
	VALUE_GROUPS.iter().find_map(|name| caps.name(name))
}

/// A class string split into utility tokens and the whitespace between them.
///
/// `gaps` always holds one more entry than `tokens`: leading whitespace, the
/// separators, then trailing whitespace. Quotes and braces around a token
/// (as in `${on ? 'text-white' : ''}`) are kept in `wraps` so rules only see
/// the class name. Rendering an unmodified value gives back the exact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTokens {
	tokens: Vec<String>,
	wraps: Vec<(String, String)>,
	gaps: Vec<String>,
}

/// Split a raw token into leading punctuation, class name and trailing punctuation.
fn peel(raw: &str) -> (String, String, String) {
	let rest = raw.trim_start_matches(PUNCTUATION);
	let core = rest.trim_end_matches(PUNCTUATION);
	(
		raw[..raw.len() - rest.len()].to_string(),
		core.to_string(),
		rest[core.len()..].to_string(),
	)
}

impl ClassTokens {
	pub fn parse(value: &str) -> Self {
		let mut raw = Vec::new();
		let mut gaps = Vec::new();
		let mut token = String::new();
		let mut gap = String::new();

		for c in value.chars() {
			if c.is_whitespace() {
				if !token.is_empty() {
					raw.push(std::mem::take(&mut token));
				}
				gap.push(c);
			} else {
				if token.is_empty() {
					gaps.push(std::mem::take(&mut gap));
				}
				token.push(c);
			}
		}
		if !token.is_empty() {
			raw.push(token);
		}
		gaps.push(gap);

		let mut tokens = Vec::with_capacity(raw.len());
		let mut wraps = Vec::with_capacity(raw.len());
		for r in &raw {
			let (prefix, core, suffix) = peel(r);
			tokens.push(core);
			wraps.push((prefix, suffix));
		}

		ClassTokens { tokens, wraps, gaps }
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		for ((gap, token), (prefix, suffix)) in self.gaps.iter().zip(&self.tokens).zip(&self.wraps) {
			out.push_str(gap);
			out.push_str(prefix);
			out.push_str(token);
			out.push_str(suffix);
		}
		if let Some(last) = self.gaps.last() {
			out.push_str(last);
		}
		out
	}

	/// Whether no quote or brace splits the window starting at `at`.
	fn is_contiguous(&self, at: usize, width: usize) -> bool {
		(at..at + width - 1).all(|k| self.wraps[k].1.is_empty() && self.wraps[k + 1].0.is_empty())
	}

	/// Replace `width` tokens at `at` with `replacement` and return how many
	/// tokens took their place.
	///
	/// Separators inside the window collapse to single spaces; the whitespace
	/// around the window is kept. The window's outer punctuation moves to the
	/// first and last new token, or stays as an empty token when nothing
	/// replaces it.
	fn splice(&mut self, at: usize, width: usize, mut replacement: Vec<String>) -> usize {
		let prefix = std::mem::take(&mut self.wraps[at].0);
		let suffix = std::mem::take(&mut self.wraps[at + width - 1].1);
		if replacement.is_empty() && !(prefix.is_empty() && suffix.is_empty()) {
			replacement.push(String::new());
		}

		let count = replacement.len();
		let mut wraps = vec![(String::new(), String::new()); count];
		if let Some(first) = wraps.first_mut() {
			first.0 = prefix;
		}
		if let Some(last) = wraps.last_mut() {
			last.1 = suffix;
		}
		self.tokens.splice(at..at + width, replacement);
		self.wraps.splice(at..at + width, wraps);

		if count == 0 {
			if at == 0 {
				self.gaps.drain(1..=width);
			} else {
				self.gaps.drain(at..at + width);
			}
		} else {
			let inner = std::iter::repeat_n(" ".to_string(), count - 1);
			self.gaps.splice(at + 1..at + width, inner);
		}
		count
	}

	/// Run one rule over the tokens, left to right, without overlapping.
	///
	/// Tokens produced by a match are not offered to the same rule again.
	/// Windows split by quotes, or followed by a token the rule excludes,
	/// are left alone. Returns the number of matches.
	pub fn apply(&mut self, rule: &CompiledRule) -> usize {
		let width = rule.width();
		let mut hits = 0;
		let mut i = 0;

		while i + width <= self.tokens.len() {
			let next = self.tokens.get(i + width).map(String::as_str);
			let replacement = if self.is_contiguous(i, width) && !rule.blocked_by(next) {
				rule.rewrite_window(&self.tokens[i..i + width])
			} else {
				None
			};

			match replacement {
				Some(replacement) => {
					i += self.splice(i, width, replacement);
					hits += 1;
				}
				None => i += 1,
			}
		}

		if hits > 0 {
			tracing::trace!(pattern = %rule.rule.pattern, hits, "rule matched");
		}
		hits
	}
}

/// Result of rewriting one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	pub content: String,
	pub changed: bool,

	/// Whether only the cleanup rules ran.
	pub themed: bool,
}

/// Rewrite a single class string.
///
/// Runs the selected rule sequence, then every override whose markers hold.
pub fn rewrite_class_string(value: &str, rules: &RuleSet, themed: bool) -> String {
	let mut tokens = ClassTokens::parse(value);

	for rule in rules.selected(themed) {
		tokens.apply(rule);
	}

	for o in &rules.overrides {
		if o.applies_to(tokens.tokens()) && tokens.apply(&o.rule) > 0 {
			tracing::trace!(name = o.spec.label(), "override applied");
		}
	}

	tokens.render()
}

/// Rewrite every class string in `content`.
///
/// If the content already carries every themed marker, only the cleanup
/// rules run. Overrides always run last.
pub fn rewrite(content: &str, rules: &RuleSet) -> Rewrite {
	let themed = rules.is_themed(content);

	let rewritten = rules.locator.regex.replace_all(content, |caps: &Captures| {
		let (Some(whole), Some(value)) = (caps.get(0), class_value(caps)) else {
			return caps[0].to_string();
		};

		let start = value.start() - whole.start();
		let end = value.end() - whole.start();
		let text = whole.as_str();

		let mut out = String::with_capacity(text.len() + 32);
		out.push_str(&text[..start]);
		out.push_str(&rewrite_class_string(value.as_str(), rules, themed));
		out.push_str(&text[end..]);
		out
	});

	let changed = rewritten != content;
	Rewrite {
		content: rewritten.into_owned(),
		changed,
		themed,
	}
}
