use crate::conf::line::{LineKind, classify, clean};
use crate::conf::value::{Value, escape_json};

/// Convert a whole document to compact JSON text in one pass.
///
/// Section headers map to nested objects: `[a.b]` opens `"a":{"b":{`. A
/// header whose dotted path extends the currently open one keeps the shared
/// prefix open, so `[a]` followed by `[a.b]` nests instead of emitting two
/// siblings; any other header first closes back down to the shared depth.
/// A header with no direct keys still produces its (empty or nested-only)
/// object. Output is deterministic and carries no whitespace.
pub fn to_json(text: &str) -> String {
	let mut out = String::from("{");
	// Open section segments, innermost last, with one had-a-member flag per
	// open context; index 0 of `members` is the root object. One `}` is
	// emitted per pop and the stack drains before the final `}`, so braces
	// balance.
	let mut stack: Vec<&str> = Vec::new();
	let mut members = vec![false];

	for raw in text.lines() {
		match classify(clean(raw)) {
			LineKind::Header(name) => {
				let path: Vec<&str> = name.split('.').collect();
				while !is_prefix(&stack, &path) {
					stack.pop();
					members.pop();
					out.push('}');
				}
				let open = stack.len();
				for &segment in &path[open..] {
					separate(&mut out, &mut members);
					out.push('"');
					out.push_str(&escape_json(segment));
					out.push_str("\":{");
					stack.push(segment);
					members.push(false);
				}
			}
			LineKind::Pair { key, raw } => {
				separate(&mut out, &mut members);
				out.push('"');
				out.push_str(&escape_json(key));
				out.push_str("\":");
				out.push_str(&Value::from_raw(raw).json_fragment());
			}
			LineKind::Skip => {}
		}
	}

	for _ in &stack {
		out.push('}');
	}
	out.push('}');
	out
}

/// Whether the open section stack is a prefix of the new header path.
fn is_prefix(stack: &[&str], path: &[&str]) -> bool {
	stack.len() <= path.len() && stack.iter().zip(path).all(|(open, seg)| open == seg)
}

/// Emit the separator before a new member of the innermost open context,
/// and record that the context now has one.
fn separate(out: &mut String, members: &mut [bool]) {
	if let Some(had_member) = members.last_mut() {
		if *had_member {
			out.push(',');
		}
		*had_member = true;
	}
}
