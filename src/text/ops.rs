/// Remove leading and trailing whitespace from a piece of text.
pub fn trim(text: &str) -> &str {
	text.trim()
}

/// Whether a string is one of the conventional truthy forms.
///
/// Recognizes `1`, `true`, `yes`, and `on`, case-insensitively, after
/// trimming. Everything else, including the empty string, is falsy.
pub fn is_truthy(text: &str) -> bool {
	matches!(
		text.trim().to_lowercase().as_str(),
		"1" | "true" | "yes" | "on"
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_trim() {
		assert_eq!(trim("  hello  "), "hello");
		assert_eq!(trim("\t tabbed \n"), "tabbed");
		assert_eq!(trim("unchanged"), "unchanged");
		assert_eq!(trim("   "), "");
	}

	#[test]
	fn test_is_truthy_accepted_forms() {
		for text in ["1", "true", "TRUE", "True", "yes", "YES", "on", "On", "  true  "] {
			assert!(is_truthy(text), "expected truthy: {text:?}");
		}
	}

	#[test]
	fn test_is_truthy_rejected_forms() {
		for text in ["", "0", "false", "no", "off", "2", "enabled", "y"] {
			assert!(!is_truthy(text), "expected falsy: {text:?}");
		}
	}
}
