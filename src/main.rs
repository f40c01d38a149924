use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tosh_cli::conf::Source;
use tosh_cli::files;
use tosh_cli::settings::{self, BackendChoice};
use tosh_cli::text::{TextBackend, ToolPaths, select_backend, trim};

#[derive(Parser)]
#[command(name = "tosh")]
#[command(
	author,
	version,
	about = "Shell-callable primitives for reading TOML-subset config files and manipulating text"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Replace/search backend, overriding the settings file
	#[arg(long, global = true, value_enum, value_name = "BACKEND")]
	backend: Option<BackendArg>,

	#[command(subcommand)]
	command: Commands,
}

/// Backend names accepted by `--backend`.
#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
	Auto,
	External,
	Native,
}

impl From<BackendArg> for BackendChoice {
	fn from(arg: BackendArg) -> Self {
		match arg {
			BackendArg::Auto => BackendChoice::Auto,
			BackendArg::External => BackendChoice::External,
			BackendArg::Native => BackendChoice::Native,
		}
	}
}

#[derive(Subcommand)]
enum Commands {
	/// Print the value for a dotted key
	Get {
		/// Source file, or `-` for stdin
		file: String,
		/// Lookup key: `section.key`, or a bare key for root scope
		key: String,
		/// Print this instead when the lookup fails for any reason
		#[arg(long, value_name = "VALUE")]
		default: Option<String>,
	},

	/// Succeed when a dotted key exists (prints nothing)
	Has {
		/// Source file, or `-` for stdin
		file: String,
		/// Lookup key: `section.key`, or a bare key for root scope
		key: String,
	},

	/// Succeed when a value is truthy: 1, true, yes, on (prints nothing)
	IsTrue {
		/// Source file, or `-` for stdin
		file: String,
		/// Lookup key: `section.key`, or a bare key for root scope
		key: String,
	},

	/// List section header names in document order, one per line
	Sections {
		/// Source file, or `-` for stdin
		file: String,
	},

	/// List bare key names at root or in a section, one per line
	Keys {
		/// Source file, or `-` for stdin
		file: String,
		/// Section to list; root keys when omitted
		section: Option<String>,
	},

	/// Print `key=value` lines for a section
	Pairs {
		/// Source file, or `-` for stdin
		file: String,
		/// Section to list
		section: String,
	},

	/// Print the elements of an array value, one per line
	Array {
		/// Source file, or `-` for stdin
		file: String,
		/// Lookup key: `section.key`, or a bare key for root scope
		key: String,
	},

	/// Convert the whole document to compact JSON
	Json {
		/// Source file, or `-` for stdin
		file: String,
	},

	/// Trim leading and trailing whitespace
	Trim {
		/// Text to trim; read from stdin when omitted
		text: Option<String>,
	},

	/// Substitute a regex pattern in the text
	Replace {
		/// Pattern to match
		pattern: String,
		/// Replacement text
		replacement: String,
		/// Text to rewrite; read from stdin when omitted
		text: Option<String>,
		/// Replace every occurrence instead of the first on each line
		#[arg(long)]
		all: bool,
	},

	/// Print the lines matching a pattern; fails when none match
	Search {
		/// Pattern to match
		pattern: String,
		/// Text to search; read from stdin when omitted
		text: Option<String>,
	},

	/// Succeed when any line matches the pattern (prints nothing)
	Contains {
		/// Pattern to match
		pattern: String,
		/// Text to search; read from stdin when omitted
		text: Option<String>,
	},

	/// Print the number of matching lines
	Count {
		/// Pattern to match
		pattern: String,
		/// Text to search; read from stdin when omitted
		text: Option<String>,
	},

	/// Succeed when the path exists (prints nothing)
	Exists {
		/// Path to probe
		path: PathBuf,
		/// Require a regular file
		#[arg(long, conflicts_with = "dir")]
		file: bool,
		/// Require a directory
		#[arg(long)]
		dir: bool,
	},

	/// Show the resolved backend, tool paths, and settings source
	Tools,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Get { file, key, default } => handle_get(&file, &key, default.as_deref()),
		Commands::Has { file, key } => handle_has(&file, &key),
		Commands::IsTrue { file, key } => handle_is_true(&file, &key),
		Commands::Sections { file } => handle_sections(&file),
		Commands::Keys { file, section } => handle_keys(&file, section.as_deref()),
		Commands::Pairs { file, section } => handle_pairs(&file, &section),
		Commands::Array { file, key } => handle_array(&file, &key),
		Commands::Json { file } => handle_json(&file),
		Commands::Trim { text } => handle_trim(text),
		Commands::Replace {
			pattern,
			replacement,
			text,
			all,
		} => {
			let backend = effective_backend(cli.backend)?;
			handle_replace(backend.as_ref(), &pattern, &replacement, text, all)
		}
		Commands::Search { pattern, text } => {
			let backend = effective_backend(cli.backend)?;
			handle_search(backend.as_ref(), &pattern, text)
		}
		Commands::Contains { pattern, text } => {
			let backend = effective_backend(cli.backend)?;
			handle_contains(backend.as_ref(), &pattern, text)
		}
		Commands::Count { pattern, text } => {
			let backend = effective_backend(cli.backend)?;
			handle_count(backend.as_ref(), &pattern, text)
		}
		Commands::Exists { path, file, dir } => handle_exists(&path, file, dir),
		Commands::Tools => handle_tools(cli.backend),
	}
}

/// Open `file` as a document source, reading stdin when it is `-`.
fn open_source(file: &str) -> Result<Source> {
	if file == "-" {
		let mut text = String::new();
		std::io::stdin()
			.read_to_string(&mut text)
			.context("Failed to read stdin")?;
		Ok(Source::from_text(text))
	} else {
		Source::open(Path::new(file)).with_context(|| format!("Failed to open {file}"))
	}
}

/// Use the TEXT argument, falling back to stdin when it is omitted.
fn text_or_stdin(text: Option<String>) -> Result<String> {
	match text {
		Some(text) => Ok(text),
		None => {
			let mut buffer = String::new();
			std::io::stdin()
				.read_to_string(&mut buffer)
				.context("Failed to read stdin")?;
			Ok(buffer)
		}
	}
}

/// The effective text backend: the CLI flag wins over the settings file.
fn effective_backend(flag: Option<BackendArg>) -> Result<Box<dyn TextBackend>> {
	let loaded = settings::load().context("Failed to load settings")?;
	let choice = flag
		.map(BackendChoice::from)
		.unwrap_or(loaded.settings.backend);
	let tools = ToolPaths::resolve(&loaded.settings);

	select_backend(choice, &tools).context("Failed to select a text backend")
}

fn exit_flag(ok: bool) -> ExitCode {
	if ok {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

fn handle_get(file: &str, key: &str, default: Option<&str>) -> Result<ExitCode> {
	if let Some(default) = default {
		// --default shields every failure, an unreadable file included.
		let value = open_source(file)
			.map(|doc| doc.get_or(key, default))
			.unwrap_or_else(|_| default.to_string());
		println!("{value}");
		return Ok(ExitCode::SUCCESS);
	}

	let doc = open_source(file)?;
	let value = doc
		.get(key)
		.with_context(|| format!("Failed to read `{key}` from {file}"))?;
	println!("{}", value.text());
	Ok(ExitCode::SUCCESS)
}

fn handle_has(file: &str, key: &str) -> Result<ExitCode> {
	// Silent by contract; an unreadable file is an ordinary "no".
	let Ok(doc) = open_source(file) else {
		return Ok(ExitCode::FAILURE);
	};
	Ok(exit_flag(doc.has(key)))
}

fn handle_is_true(file: &str, key: &str) -> Result<ExitCode> {
	let Ok(doc) = open_source(file) else {
		return Ok(ExitCode::FAILURE);
	};
	Ok(exit_flag(doc.is_true(key)))
}

fn handle_sections(file: &str) -> Result<ExitCode> {
	let doc = open_source(file)?;
	for name in doc.sections() {
		println!("{name}");
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_keys(file: &str, section: Option<&str>) -> Result<ExitCode> {
	let doc = open_source(file)?;
	for key in doc.keys(section) {
		println!("{key}");
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_pairs(file: &str, section: &str) -> Result<ExitCode> {
	let doc = open_source(file)?;
	let pairs = doc
		.section_pairs(section)
		.with_context(|| format!("Failed to list section `{section}` of {file}"))?;
	for (key, value) in pairs {
		println!("{key}={value}");
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_array(file: &str, key: &str) -> Result<ExitCode> {
	let doc = open_source(file)?;
	let values = doc
		.to_array(key)
		.with_context(|| format!("Failed to read `{key}` from {file}"))?;
	for value in values {
		println!("{}", value.text());
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_json(file: &str) -> Result<ExitCode> {
	let doc = open_source(file)?;
	println!("{}", doc.to_json());
	Ok(ExitCode::SUCCESS)
}

fn handle_trim(text: Option<String>) -> Result<ExitCode> {
	let text = text_or_stdin(text)?;
	println!("{}", trim(&text));
	Ok(ExitCode::SUCCESS)
}

fn handle_replace(
	backend: &dyn TextBackend,
	pattern: &str,
	replacement: &str,
	text: Option<String>,
	all: bool,
) -> Result<ExitCode> {
	let input = text_or_stdin(text)?;
	let output = backend
		.replace(&input, pattern, replacement, all)
		.with_context(|| format!("Failed to replace `{pattern}`"))?;
	println!("{output}");
	Ok(ExitCode::SUCCESS)
}

fn handle_search(
	backend: &dyn TextBackend,
	pattern: &str,
	text: Option<String>,
) -> Result<ExitCode> {
	let input = text_or_stdin(text)?;
	let lines = backend
		.search(&input, pattern)
		.with_context(|| format!("Failed to search for `{pattern}`"))?;
	for line in &lines {
		println!("{line}");
	}
	// grep convention: no matching lines is exit 1.
	Ok(exit_flag(!lines.is_empty()))
}

fn handle_contains(
	backend: &dyn TextBackend,
	pattern: &str,
	text: Option<String>,
) -> Result<ExitCode> {
	let input = text_or_stdin(text)?;
	let found = backend
		.contains(&input, pattern)
		.with_context(|| format!("Failed to search for `{pattern}`"))?;
	Ok(exit_flag(found))
}

fn handle_count(
	backend: &dyn TextBackend,
	pattern: &str,
	text: Option<String>,
) -> Result<ExitCode> {
	let input = text_or_stdin(text)?;
	let count = backend
		.count_matches(&input, pattern)
		.with_context(|| format!("Failed to search for `{pattern}`"))?;
	println!("{count}");
	Ok(ExitCode::SUCCESS)
}

fn handle_exists(path: &Path, file: bool, dir: bool) -> Result<ExitCode> {
	let ok = if file {
		files::is_file(path)
	} else if dir {
		files::is_dir(path)
	} else {
		files::exists(path)
	};
	Ok(exit_flag(ok))
}

fn handle_tools(flag: Option<BackendArg>) -> Result<ExitCode> {
	let loaded = settings::load().context("Failed to load settings")?;
	let choice = flag
		.map(BackendChoice::from)
		.unwrap_or(loaded.settings.backend);
	let tools = ToolPaths::resolve(&loaded.settings);

	match &loaded.path {
		Some(path) => println!("settings: {}", path.display()),
		None => println!("settings: (defaults)"),
	}
	println!("backend: {}", choice.as_str());

	match select_backend(choice, &tools) {
		Ok(backend) => println!("selected: {}", backend.name()),
		Err(e) => println!("selected: (unavailable: {e})"),
	}

	match &tools.sed {
		Some(path) => println!("sed: {}", path.display()),
		None => println!("sed: (not found)"),
	}
	match &tools.grep {
		Some(path) => println!("grep: {}", path.display()),
		None => println!("grep: (not found)"),
	}

	Ok(ExitCode::SUCCESS)
}
