use crate::error::{Result, ToshError};
use crate::settings::BackendChoice;
use crate::text::tools::ToolPaths;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Strategy interface over the replace/search implementations.
///
/// Pattern dialects are the backends' own: POSIX ERE and sed replacement
/// syntax externally, Rust `regex` syntax natively. Both operate line by
/// line, so a non-global replace substitutes the first occurrence on each
/// line, as sed does.
pub trait TextBackend {
	/// The backend's display name.
	fn name(&self) -> &'static str;

	/// Substitute `pattern` with `replacement` in `input`: the first
	/// occurrence on each line, or every occurrence when `all` is set.
	/// The result carries no trailing newline.
	fn replace(&self, input: &str, pattern: &str, replacement: &str, all: bool) -> Result<String>;

	/// The lines of `input` matching `pattern`, in order.
	fn search(&self, input: &str, pattern: &str) -> Result<Vec<String>>;

	/// Whether any line of `input` matches `pattern`.
	fn contains(&self, input: &str, pattern: &str) -> Result<bool>;

	/// The number of lines of `input` matching `pattern`.
	fn count_matches(&self, input: &str, pattern: &str) -> Result<usize> {
		Ok(self.search(input, pattern)?.len())
	}
}

/// Pick the backend implementation for the given choice.
///
/// Selection probes the resolved tools once: `auto` takes the external
/// backend when both tools resolved and the native engine otherwise;
/// `external` is an error when a tool is missing; `native` always works.
/// The returned handle is the single place the decision lives.
pub fn select_backend(choice: BackendChoice, tools: &ToolPaths) -> Result<Box<dyn TextBackend>> {
	match choice {
		BackendChoice::Native => Ok(Box::new(NativeBackend)),
		BackendChoice::External => match (&tools.sed, &tools.grep) {
			(Some(sed), Some(grep)) => {
				Ok(Box::new(ExternalBackend::new(sed.clone(), grep.clone())))
			}
			(None, _) => Err(ToshError::ToolNotFound {
				tool: "sed".to_string(),
			}),
			(_, None) => Err(ToshError::ToolNotFound {
				tool: "grep".to_string(),
			}),
		},
		BackendChoice::Auto => match (&tools.sed, &tools.grep) {
			(Some(sed), Some(grep)) => {
				Ok(Box::new(ExternalBackend::new(sed.clone(), grep.clone())))
			}
			_ => Ok(Box::new(NativeBackend)),
		},
	}
}

/// The built-in engine: the `regex` crate, applied line by line.
#[derive(Debug, Clone, Copy)]
pub struct NativeBackend;

impl TextBackend for NativeBackend {
	fn name(&self) -> &'static str {
		"native"
	}

	fn replace(&self, input: &str, pattern: &str, replacement: &str, all: bool) -> Result<String> {
		let regex = compile_pattern(pattern)?;
		let lines: Vec<String> = input
			.lines()
			.map(|line| {
				if all {
					regex.replace_all(line, replacement).into_owned()
				} else {
					regex.replace(line, replacement).into_owned()
				}
			})
			.collect();

		Ok(lines.join("\n"))
	}

	fn search(&self, input: &str, pattern: &str) -> Result<Vec<String>> {
		let regex = compile_pattern(pattern)?;
		Ok(input
			.lines()
			.filter(|line| regex.is_match(line))
			.map(str::to_string)
			.collect())
	}

	fn contains(&self, input: &str, pattern: &str) -> Result<bool> {
		let regex = compile_pattern(pattern)?;
		Ok(input.lines().any(|line| regex.is_match(line)))
	}
}

/// Compile a regex pattern string.
fn compile_pattern(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| ToshError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

/// Delegation to the resolved `sed` and `grep` binaries.
#[derive(Debug, Clone)]
pub struct ExternalBackend {
	sed: PathBuf,
	grep: PathBuf,
}

impl ExternalBackend {
	pub fn new(sed: PathBuf, grep: PathBuf) -> Self {
		ExternalBackend { sed, grep }
	}
}

impl TextBackend for ExternalBackend {
	fn name(&self) -> &'static str {
		"external"
	}

	fn replace(&self, input: &str, pattern: &str, replacement: &str, all: bool) -> Result<String> {
		let expression = sed_expression(pattern, replacement, all);
		let output = run_tool(&self.sed, &["-E", &expression], input)?;

		if !output.status.success() {
			return Err(exit_error(&self.sed, output.status));
		}

		let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
		// sed may or may not terminate the last line; normalize so both
		// backends hand back the same text.
		if text.ends_with('\n') {
			text.pop();
		}
		Ok(text)
	}

	fn search(&self, input: &str, pattern: &str) -> Result<Vec<String>> {
		let output = run_tool(&self.grep, &["-E", "-e", pattern], input)?;

		match output.status.code() {
			// Exit 1 is grep for "no matching lines", not a failure.
			Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout)
				.lines()
				.map(str::to_string)
				.collect()),
			_ => Err(exit_error(&self.grep, output.status)),
		}
	}

	fn contains(&self, input: &str, pattern: &str) -> Result<bool> {
		let output = run_tool(&self.grep, &["-q", "-E", "-e", pattern], input)?;

		match output.status.code() {
			Some(0) => Ok(true),
			Some(1) => Ok(false),
			_ => Err(exit_error(&self.grep, output.status)),
		}
	}
}

/// Build the sed substitute expression.
///
/// `/` stays the delimiter; occurrences in the pattern or replacement are
/// escaped so path-like patterns remain usable.
fn sed_expression(pattern: &str, replacement: &str, all: bool) -> String {
	let pattern = pattern.replace('/', r"\/");
	let replacement = replacement.replace('/', r"\/");
	let flags = if all { "g" } else { "" };
	format!("s/{pattern}/{replacement}/{flags}")
}

/// Run a tool with the given arguments, feeding `input` on stdin and
/// capturing its output.
fn run_tool(tool: &Path, args: &[&str], input: &str) -> Result<Output> {
	let mut child = Command::new(tool)
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.map_err(|source| spawn_error(tool, source))?;

	// Stdin is written from a helper thread: writing inline can deadlock
	// against the output pipe once it fills. The child may also stop
	// reading early (grep -q does), so a broken-pipe write is tolerated.
	let writer = child.stdin.take().map(|mut stdin| {
		let payload = input.as_bytes().to_vec();
		std::thread::spawn(move || {
			let _ = stdin.write_all(&payload);
		})
	});

	let output = child
		.wait_with_output()
		.map_err(|source| ToshError::ToolFailed {
			tool: tool.display().to_string(),
			source,
		})?;

	if let Some(handle) = writer {
		let _ = handle.join();
	}

	Ok(output)
}

/// Map a spawn failure, special-casing a missing binary.
fn spawn_error(tool: &Path, source: std::io::Error) -> ToshError {
	if source.kind() == std::io::ErrorKind::NotFound {
		ToshError::ToolNotFound {
			tool: tool.display().to_string(),
		}
	} else {
		ToshError::ToolFailed {
			tool: tool.display().to_string(),
			source,
		}
	}
}

/// An exit status no contract accounts for.
fn exit_error(tool: &Path, status: ExitStatus) -> ToshError {
	ToshError::ToolExit {
		tool: tool.display().to_string(),
		code: status.code().unwrap_or(-1),
	}
}
