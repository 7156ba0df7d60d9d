use crate::error::{BundleConfigError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

#[cfg(test)]
const REGEX_FLAGS: &str = "dgimsuvy";

/// A match pattern as stored in a rule descriptor.
///
/// The tree is plain JSON, so regular expressions are encoded as JS regex
/// literal strings (`"/\\.css$/"`). Any other string is a literal match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
	/// Regex source, without delimiters or flags.
	Regex(String),

	/// Literal string, compared verbatim by the bundler.
	Literal(String),
}

impl Pattern {
	pub fn regex(source: impl Into<String>) -> Self {
		Pattern::Regex(source.into())
	}

	pub fn literal(text: impl Into<String>) -> Self {
		Pattern::Literal(text.into())
	}

	/// Encode this pattern for the configuration tree.
	pub fn to_value(&self) -> Value {
		match self {
			Pattern::Regex(source) => Value::String(format!("/{}/", source)),
			Pattern::Literal(text) => Value::String(text.clone()),
		}
	}

	/// Decode a tree value. Strings shaped like `/source/flags` are regexes.
	#[cfg(test)]
	pub(crate) fn from_value(value: &Value) -> Option<Self> {
		let text = value.as_str()?;
		if let Some(rest) = text.strip_prefix('/')
			&& let Some(end) = rest.rfind('/')
			&& rest[end + 1..].chars().all(|c| REGEX_FLAGS.contains(c))
		{
			return Some(Pattern::Regex(rest[..end].to_string()));
		}
		Some(Pattern::Literal(text.to_string()))
	}

	/// Check that a regex pattern compiles. Literals always pass.
	pub fn validate(&self) -> Result<()> {
		if let Pattern::Regex(source) = self {
			compile_regex(source)?;
		}
		Ok(())
	}
}

impl Serialize for Pattern {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Pattern::Regex(source) => serializer.collect_str(&format_args!("/{}/", source)),
			Pattern::Literal(text) => serializer.serialize_str(text),
		}
	}
}

/// Compile a regex pattern string.
pub fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| BundleConfigError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Regex source matching any of `names` literally, as one capture group.
pub fn alternation(names: &[String]) -> String {
	let escaped: Vec<String> = names.iter().map(|name| regex::escape(name)).collect();
	format!("({})", escaped.join("|"))
}
