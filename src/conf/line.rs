/// A single scanned line, after cleaning.
///
/// Malformed lines are never an error: anything that is not a section header
/// or a `key = value` pair classifies as `Skip` and scanners move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
	/// `[name]` or `[name.sub]`; the bracket interior, kept verbatim.
	Header(&'a str),

	/// `key = value`, split at the first `=`, both sides trimmed.
	Pair { key: &'a str, raw: &'a str },

	/// Blank, comment-only, or unrecognized.
	Skip,
}

/// Strip the comment and surrounding whitespace from a raw line.
///
/// Truncates at the first `#` unconditionally. Quote context is deliberately
/// not tracked: a `#` inside a quoted value still starts a comment, a known
/// limitation of the format.
pub fn clean(line: &str) -> &str {
	let line = match line.find('#') {
		Some(pos) => &line[..pos],
		None => line,
	};
	line.trim()
}

/// Classify a cleaned line.
///
/// A header is a full-line `[...]` whose interior contains no `]`. A pair is
/// anything with an `=` and a non-empty left side; the value may contain
/// further `=` characters. Everything else is skipped.
pub fn classify(line: &str) -> LineKind<'_> {
	if let Some(interior) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'))
		&& !interior.contains(']')
	{
		return LineKind::Header(interior);
	}

	if let Some((left, right)) = line.split_once('=') {
		let key = left.trim();
		if !key.is_empty() {
			return LineKind::Pair {
				key,
				raw: right.trim(),
			};
		}
	}

	LineKind::Skip
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_clean_strips_comment() {
		assert_eq!(clean("key = 1 # note"), "key = 1");
		assert_eq!(clean("# whole line"), "");
		assert_eq!(clean("   # indented"), "");
	}

	#[test]
	fn test_clean_strips_comment_inside_quotes() {
		// The cleaner does not track quotes; this is the documented gap.
		assert_eq!(clean(r#"key = "a # b""#), r#"key = "a"#);
	}

	#[test]
	fn test_clean_trims_whitespace() {
		assert_eq!(clean("  key = 1  "), "key = 1");
		assert_eq!(clean("\tkey = 1\r"), "key = 1");
		assert_eq!(clean(""), "");
		assert_eq!(clean("   "), "");
	}

	#[test]
	fn test_classify_header() {
		assert_eq!(classify("[server]"), LineKind::Header("server"));
		assert_eq!(classify("[a.b.c]"), LineKind::Header("a.b.c"));
		assert_eq!(classify("[]"), LineKind::Header(""));
	}

	#[test]
	fn test_classify_header_interior_kept_verbatim() {
		assert_eq!(classify("[ padded ]"), LineKind::Header(" padded "));
	}

	#[test]
	fn test_classify_rejects_bracket_in_interior() {
		// `]` inside the interior disqualifies the line as a header.
		assert_eq!(classify("[a]b]"), LineKind::Skip);
		assert_eq!(classify("[a][b]"), LineKind::Skip);
	}

	#[test]
	fn test_classify_pair() {
		assert_eq!(
			classify("key = value"),
			LineKind::Pair {
				key: "key",
				raw: "value"
			}
		);
	}

	#[test]
	fn test_classify_pair_splits_at_first_equals() {
		assert_eq!(
			classify("key = a=b"),
			LineKind::Pair {
				key: "key",
				raw: "a=b"
			}
		);
	}

	#[test]
	fn test_classify_pair_empty_value() {
		assert_eq!(classify("key ="), LineKind::Pair { key: "key", raw: "" });
	}

	#[test]
	fn test_classify_pair_requires_left_side() {
		assert_eq!(classify("= value"), LineKind::Skip);
		assert_eq!(classify("   = value"), LineKind::Skip);
	}

	#[test]
	fn test_classify_skip() {
		assert_eq!(classify(""), LineKind::Skip);
		assert_eq!(classify("free text"), LineKind::Skip);
		assert_eq!(classify("[unclosed"), LineKind::Skip);
	}
}
