use crate::settings::Settings;
use std::path::{Path, PathBuf};

/// Resolved locations of the external text tools.
///
/// Resolved once and passed explicitly to whoever needs them; there is no
/// process-wide tool table. A `None` entry means the tool was not found.
#[derive(Debug, Clone, Default)]
pub struct ToolPaths {
	/// Resolved `sed` binary, used for replace.
	pub sed: Option<PathBuf>,

	/// Resolved `grep` binary, used for search/contains/count.
	pub grep: Option<PathBuf>,
}

impl ToolPaths {
	/// Resolve both tools, honoring paths pinned in the settings.
	pub fn resolve(settings: &Settings) -> ToolPaths {
		ToolPaths {
			sed: resolve_pinned(settings.sed_path.as_deref(), "sed"),
			grep: resolve_pinned(settings.grep_path.as_deref(), "grep"),
		}
	}
}

/// A pinned path wins when it exists; otherwise fall back to PATH lookup.
fn resolve_pinned(pinned: Option<&Path>, name: &str) -> Option<PathBuf> {
	if let Some(path) = pinned
		&& path.exists()
	{
		return Some(path.to_path_buf());
	}

	resolve_tool(name)
}

/// Resolve a tool name to its full path.
///
/// An absolute name resolves to itself when it exists; a bare name takes
/// the first hit walking `PATH`.
pub fn resolve_tool(name: &str) -> Option<PathBuf> {
	let path = Path::new(name);
	if path.is_absolute() {
		return path.exists().then(|| path.to_path_buf());
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.map(|dir| dir.join(name))
		.find(|candidate| candidate.exists())
}
