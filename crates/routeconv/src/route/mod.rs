//! Route module for pattern classification and parsing
//!
//! Contains pure functional components that turn raw patterns into parts:
//! - `pattern` - per-segment classification into literals and captures
//! - `parser` - whole-pattern parsing and the suffix policy

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{decide_suffix, parse_pattern, ParsedPattern, RegexRef, Suffix};
pub use pattern::{classify_segment, Capture, Classified, Part, SegmentKind};
