use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern compiles"));
static FLOAT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("float pattern compiles"));

/// A decoded configuration value.
///
/// Numbers are kept as written; nothing in the scanner ever parses them
/// numerically. `Raw` is bare text that matched no other form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Quoted string, quotes removed, content passed through verbatim.
	Str(String),

	/// Bare `true` or `false`.
	Bool(bool),

	/// Bare integer or float, textual.
	Number(String),

	/// Bracketed array, elements in document order.
	Array(Vec<Value>),

	/// Unquoted bare text.
	Raw(String),
}

impl Value {
	/// Resolve the type of a raw value string.
	///
	/// Checked in order: exact `true`/`false`, integer, float, bracketed
	/// array (elements resolved recursively), quoted string, bare text.
	/// The checks run against the raw text, so `"true"` with quotes stays
	/// a string.
	pub fn from_raw(raw: &str) -> Value {
		match raw {
			"true" => return Value::Bool(true),
			"false" => return Value::Bool(false),
			_ => {}
		}

		if INT_RE.is_match(raw) || FLOAT_RE.is_match(raw) {
			return Value::Number(raw.to_string());
		}

		if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
			let interior = &raw[1..raw.len() - 1];
			let items = split_items(interior).into_iter().map(Value::from_raw).collect();
			return Value::Array(items);
		}

		unquote(raw)
	}

	/// The decoded text of this value, as a shell consumer sees it.
	pub fn text(&self) -> String {
		match self {
			Value::Str(content) | Value::Raw(content) | Value::Number(content) => content.clone(),
			Value::Bool(flag) => flag.to_string(),
			Value::Array(items) => {
				let texts: Vec<String> = items.iter().map(Value::text).collect();
				format!("[{}]", texts.join(", "))
			}
		}
	}

	/// Render this value as a JSON fragment.
	///
	/// Strings escape exactly `\` and `"`; no other escape sequences are
	/// produced, matching the format's pass-through string semantics.
	pub fn json_fragment(&self) -> String {
		match self {
			Value::Bool(flag) => flag.to_string(),
			Value::Number(text) => text.clone(),
			Value::Str(content) | Value::Raw(content) => {
				format!("\"{}\"", escape_json(content))
			}
			Value::Array(items) => {
				let parts: Vec<String> = items.iter().map(Value::json_fragment).collect();
				format!("[{}]", parts.join(","))
			}
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text())
	}
}

/// Unwrap the quoting of a raw value string.
///
/// `"…"` and `'…'` both become `Str` with the content untouched (no escape
/// decoding at this stage). Anything else is `Raw`, trimmed. Type resolution
/// for bare values happens in the consumer, not here.
pub fn unquote(raw: &str) -> Value {
	if let Some(content) = quoted_interior(raw, '"') {
		return Value::Str(content.to_string());
	}
	if let Some(content) = quoted_interior(raw, '\'') {
		return Value::Str(content.to_string());
	}
	Value::Raw(raw.trim().to_string())
}

/// The content between a matching pair of wrapping quotes, if any.
fn quoted_interior(raw: &str, quote: char) -> Option<&str> {
	// A lone quote character strips the prefix and has nothing left to
	// strip as a suffix, so it correctly falls through to Raw.
	raw.strip_prefix(quote)?.strip_suffix(quote)
}

/// Split the interior of a bracketed array into raw element strings.
///
/// One left-to-right scan. The in-quotes flag toggles only on `"`; commas
/// inside single-quoted elements are NOT protected, a documented gap kept
/// for compatibility. A comma outside quotes delimits; elements are trimmed
/// and empty ones dropped. Element decoding is the caller's job.
pub fn split_items(interior: &str) -> Vec<&str> {
	let mut items = Vec::new();
	let mut in_quotes = false;
	let mut start = 0;

	for (pos, ch) in interior.char_indices() {
		match ch {
			'"' => in_quotes = !in_quotes,
			',' if !in_quotes => {
				let item = interior[start..pos].trim();
				if !item.is_empty() {
					items.push(item);
				}
				start = pos + 1;
			}
			_ => {}
		}
	}

	let item = interior[start..].trim();
	if !item.is_empty() {
		items.push(item);
	}

	items
}

/// Escape a string for embedding in JSON output: `\` and `"` only.
pub(crate) fn escape_json(text: &str) -> String {
	text.replace('\\', "\\\\").replace('"', "\\\"")
}
