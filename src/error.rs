//! Errors reported by the `try_*` constructors.
//!
//! The panicking constructors report the same conditions, using the
//! [`Display`] text of these variants as the panic message.
//!
//! [`Display`]: std::fmt::Display

/// Why a shape, a stride list or a conversion was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("expected {rank} or {rank_dynamic} sizes, got {got}")]
    SizeCount { rank: usize, rank_dynamic: usize, got: usize },

    #[error("dimension {dim} has static extent {expected}, got {got}")]
    StaticExtentMismatch { dim: usize, expected: usize, got: usize },

    #[error("value {value} in dimension {dim} is not representable by the index type")]
    NotRepresentable { dim: usize, value: String },

    #[error("expected {rank} strides, got {got}")]
    StrideCount { rank: usize, got: usize },

    #[error("dimension {dim} has stride {got}, expected {expected}")]
    StrideMismatch { dim: usize, expected: usize, got: usize },

    #[error("stride {stride} of dimension {dim} must be at least the span {span} of smaller strides")]
    OverlappingStrides { dim: usize, stride: usize, span: usize },
}
