use crate::conf::json;
use crate::conf::line::{LineKind, classify, clean};
use crate::conf::value::{Value, split_items, unquote};
use crate::error::{Result, ToshError};
use crate::files;
use crate::text::ops::is_truthy;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IDENT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

/// Scanner state for scoped operations: whether the pairs currently being
/// scanned belong to the target scope.
#[derive(Debug)]
pub struct Scope<'a> {
	target: &'a str,
	active: bool,
}

impl<'a> Scope<'a> {
	/// A scope targeting `section`; the empty string targets root keys.
	pub fn new(target: &'a str) -> Self {
		Scope {
			target,
			active: target.is_empty(),
		}
	}

	/// Record a section header encountered by the scan.
	///
	/// A root-targeted scope deactivates permanently on the first header of
	/// any name: root keys must precede all sections. A named target opens
	/// on every exactly matching header, so a duplicate header re-opens it.
	pub fn enter(&mut self, header: &str) {
		self.active = !self.target.is_empty() && header == self.target;
	}

	/// Whether the scan is currently inside the target scope.
	pub fn active(&self) -> bool {
		self.active
	}
}

/// A configuration source: the raw text of one TOML-subset document.
///
/// No parsed representation is kept. Every query walks the text from the
/// top, so repeated queries repeat the scan; in exchange the handle carries
/// no state between calls and is freely shared across threads.
///
/// # Example
///
/// ```
/// use tosh_cli::conf::Source;
///
/// let doc = Source::from_text("title = \"demo\"\n[server]\nport = 8080\n");
/// assert_eq!(doc.get("server.port").unwrap().text(), "8080");
/// assert!(doc.has("title"));
/// ```
#[derive(Debug, Clone)]
pub struct Source {
	text: String,
}

impl Source {
	/// Read a source document from a file.
	pub fn open(path: &Path) -> Result<Source> {
		Ok(Source {
			text: files::read_source(path)?,
		})
	}

	/// Wrap an in-memory document (useful for testing).
	pub fn from_text(text: impl Into<String>) -> Source {
		Source { text: text.into() }
	}

	/// The raw document text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Look up a value by dotted key.
	///
	/// The key splits at the first `.` into section and bare key; without a
	/// dot the lookup targets root keys, which must precede all sections.
	/// The first matching pair in document order wins. Duplicate section
	/// headers are independent regions and are all searched.
	pub fn get(&self, key: &str) -> Result<Value> {
		self.find_raw(key).map(unquote)
	}

	/// Like [`get`](Source::get), but never fails: any lookup failure
	/// yields `default` verbatim.
	pub fn get_or(&self, key: &str, default: &str) -> String {
		match self.get(key) {
			Ok(value) => value.text(),
			Err(_) => default.to_string(),
		}
	}

	/// Whether [`get`](Source::get) would succeed for this key.
	pub fn has(&self, key: &str) -> bool {
		self.get(key).is_ok()
	}

	/// Whether the value under `key` is a conventional truthy string.
	/// False when the key is absent.
	pub fn is_true(&self, key: &str) -> bool {
		match self.get(key) {
			Ok(value) => is_truthy(&value.text()),
			Err(_) => false,
		}
	}

	/// Section header names in document order, without deduplication.
	///
	/// The iterator is lazy and borrows the document; call again to restart.
	pub fn sections(&self) -> impl Iterator<Item = &str> {
		self.text.lines().filter_map(|raw| match classify(clean(raw)) {
			LineKind::Header(name) => Some(name),
			_ => None,
		})
	}

	/// Bare key names in the given scope (root when `None`), in order.
	///
	/// A pair is accepted only when its key is a plain identifier and the
	/// cleaned line does not begin with a quote character — a defensive
	/// filter against array text spilling onto its own line.
	pub fn keys(&self, section: Option<&str>) -> Vec<String> {
		let mut scope = Scope::new(section.unwrap_or(""));
		let mut keys = Vec::new();

		for raw in self.text.lines() {
			let line = clean(raw);
			match classify(line) {
				LineKind::Header(name) => scope.enter(name),
				LineKind::Pair { key, .. } if scope.active() => {
					if !line.starts_with('"') && !line.starts_with('\'') && IDENT_RE.is_match(key) {
						keys.push(key.to_string());
					}
				}
				_ => {}
			}
		}

		keys
	}

	/// All `(key, decoded value text)` pairs of the named section, in order.
	///
	/// Leading unrelated sections are scanned through silently; the scan
	/// stops at the first different header seen after the target section.
	/// An absent section or an empty body yields an empty vec; only an
	/// empty section argument is an error.
	pub fn section_pairs(&self, section: &str) -> Result<Vec<(String, String)>> {
		if section.is_empty() {
			return Err(ToshError::EmptySection);
		}

		let mut scope = Scope::new(section);
		let mut entered = false;
		let mut pairs = Vec::new();

		for raw in self.text.lines() {
			match classify(clean(raw)) {
				LineKind::Header(name) => {
					scope.enter(name);
					if scope.active() {
						entered = true;
					} else if entered {
						// A different header after the target section ends
						// the region.
						break;
					}
				}
				LineKind::Pair { key, raw: value } if scope.active() => {
					pairs.push((key.to_string(), unquote(value).text()));
				}
				_ => {}
			}
		}

		Ok(pairs)
	}

	/// Look up a value and decode it as an array.
	///
	/// A bracketed value is split quote-aware into elements, each decoded
	/// independently; a scalar value becomes a one-element vec. Fails when
	/// the underlying lookup fails.
	pub fn to_array(&self, key: &str) -> Result<Vec<Value>> {
		let raw = self.find_raw(key)?;
		if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
			let interior = &raw[1..raw.len() - 1];
			Ok(split_items(interior).into_iter().map(unquote).collect())
		} else {
			Ok(vec![unquote(raw)])
		}
	}

	/// Convert the whole document to compact JSON text.
	pub fn to_json(&self) -> String {
		json::to_json(&self.text)
	}

	/// The raw (still quoted) value string for a dotted key.
	fn find_raw(&self, key: &str) -> Result<&str> {
		let (section, bare) = split_key(key)?;
		let mut scope = Scope::new(section);

		for raw in self.text.lines() {
			match classify(clean(raw)) {
				LineKind::Header(name) => scope.enter(name),
				LineKind::Pair { key: found, raw: value } if scope.active() && found == bare => {
					return Ok(value);
				}
				_ => {}
			}
		}

		Err(ToshError::KeyNotFound { key: key.to_string() })
	}
}

/// Split a dotted lookup key into (section, bare key) at the first dot.
fn split_key(key: &str) -> Result<(&str, &str)> {
	if key.is_empty() {
		return Err(ToshError::EmptyKey);
	}

	Ok(match key.split_once('.') {
		Some((section, bare)) => (section, bare),
		None => ("", key),
	})
}
