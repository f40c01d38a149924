//! Tosh - shell-friendly TOML-subset reading and text manipulation.
//!
//! This library provides the core functionality for tosh, including:
//! - A single-pass scanner over TOML-subset documents: scoped key lookups,
//!   section and key enumeration, array decoding, and JSON conversion
//! - Text primitives (trim, truthiness) and regex replace/search delegated
//!   to external `sed`/`grep` or handled by the built-in engine
//! - Settings loading for the tool's own configuration
//!
//! # Example
//!
//! ```
//! use tosh_cli::conf::Source;
//!
//! let doc = Source::from_text("title = \"demo\"\n[server]\nport = 8080\n");
//!
//! assert_eq!(doc.get("title").unwrap().text(), "demo");
//! assert_eq!(doc.get("server.port").unwrap().text(), "8080");
//! assert!(doc.has("server.port"));
//! assert_eq!(doc.to_json(), r#"{"title":"demo","server":{"port":8080}}"#);
//! ```

pub mod conf;
pub mod error;
pub mod files;
pub mod settings;
pub mod text;

pub use error::{Result, ToshError};
