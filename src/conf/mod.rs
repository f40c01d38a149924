//! The TOML-subset scanning engine.
//!
//! This module handles:
//! - Comment stripping and line classification
//! - Scalar and array value decoding
//! - Scoped lookups and enumeration over a re-scanned source
//! - Whole-document JSON conversion
//!
//! Nothing here builds or caches a document tree: a [`Source`] holds the
//! raw text and every operation scans it from the top.

pub mod json;
pub mod line;
pub mod query;
pub mod value;

pub use json::to_json;
pub use line::{LineKind, classify, clean};
pub use query::{Scope, Source};
pub use value::{Value, split_items, unquote};
