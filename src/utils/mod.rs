//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `paths` - Home expansion and root-relative path display

pub mod io;
pub mod paths;
