//! Text manipulation for tosh.
//!
//! This module handles:
//! - Trim and truthiness primitives
//! - External tool discovery (sed/grep)
//! - The replace/search backend strategy and its selection

pub mod backend;
pub mod ops;
pub mod tools;

pub use backend::{ExternalBackend, NativeBackend, TextBackend, select_backend};
pub use ops::{is_truthy, trim};
pub use tools::{ToolPaths, resolve_tool};
