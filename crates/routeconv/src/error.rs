//! Errors raised while compiling patterns and moving tables in and out
//!
//! Compilation errors (`UnknownConverterType`, `MalformedPattern`) are scoped
//! to a single pattern: a batch records them per row and keeps going.

use thiserror::Error;

/// Failure to classify one segment, before the owning pattern is known
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// `<type:name>` referenced a type missing from the registry
    #[error("unknown converter type {0:?}")]
    UnknownType(String),
    /// The opaque-regex fallback could not split the segment
    #[error("segment {0:?} cannot be classified")]
    Malformed(String),
}

impl SegmentError {
    /// Attaches the raw pattern the segment came from
    pub fn in_pattern(self, pattern: &str) -> ConvertError {
        match self {
            SegmentError::UnknownType(type_name) => ConvertError::UnknownConverterType {
                pattern: pattern.to_string(),
                type_name,
            },
            SegmentError::Malformed(segment) => ConvertError::MalformedPattern {
                pattern: pattern.to_string(),
                segment,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown converter type {type_name:?} in pattern {pattern:?}")]
    UnknownConverterType { pattern: String, type_name: String },

    #[error("malformed pattern {pattern:?}: segment {segment:?} matched no rule")]
    MalformedPattern { pattern: String, segment: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
