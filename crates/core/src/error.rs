//! Error types for chain compilation and dispatch
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Both error kinds are programmer errors (a malformed call chain), never
//! transient failures: there is no retry and no recovery. The capability
//! layer makes most of them unreachable at compile time, but the compiler
//! and dispatch engine check exhaustively regardless, since interface-level
//! prevention is advisory.

use crate::op::{MutationKind, Projection};
use crate::selector::SelectorKind;
use std::fmt;
use thiserror::Error;

/// Result type alias for chain compilation and dispatch
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for chain compilation and dispatch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A selector kind that cannot serve as an intermediate navigation
    /// step was superseded by another selector
    #[error("selector `{kind}` cannot serve as an intermediate path step")]
    IllegalPathStep {
        /// The offending selector kind
        kind: SelectorKind,
    },

    /// The requested projection, inversion, or mutation is not legal for
    /// the pending selector's kind
    #[error("selector `{kind}` does not support {request}")]
    UnsupportedProjection {
        /// The pending selector kind
        kind: SelectorKind,
        /// What was asked of it
        request: Request,
    },
}

/// The terminal request an [`Error::UnsupportedProjection`] names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// A read/remove projection, possibly inverted
    Read {
        /// Requested terminal shape
        projection: Projection,
        /// "All others" mode
        inverted: bool,
    },
    /// A value mutation
    Mutation(MutationKind),
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Read {
                projection,
                inverted: false,
            } => write!(f, "the `{projection}` projection"),
            Request::Read {
                projection,
                inverted: true,
            } => write!(f, "the inverted `{projection}` projection"),
            Request::Mutation(kind) => write!(f, "the `{kind}` mutation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_path_step_display() {
        let err = Error::IllegalPathStep {
            kind: SelectorKind::MapByKeyRange,
        };
        let msg = err.to_string();
        assert!(msg.contains("map-by-key-range"));
        assert!(msg.contains("intermediate path step"));
    }

    #[test]
    fn test_unsupported_projection_display() {
        let err = Error::UnsupportedProjection {
            kind: SelectorKind::MapByIndex,
            request: Request::Read {
                projection: Projection::Count,
                inverted: true,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("map-by-index"));
        assert!(msg.contains("inverted `count` projection"));
    }

    #[test]
    fn test_unsupported_mutation_display() {
        let err = Error::UnsupportedProjection {
            kind: SelectorKind::ListByRank,
            request: Request::Mutation(MutationKind::Insert),
        };
        let msg = err.to_string();
        assert!(msg.contains("list-by-rank"));
        assert!(msg.contains("`insert` mutation"));
    }
}
