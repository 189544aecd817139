//! Core types for Keyhole
//!
//! This crate defines the data model shared by the chain builder and any
//! alternate front-end (e.g. a textual path-expression tokenizer):
//! - Value: normalized parameter/payload representation
//! - Selector / SelectorKind: the addressing vocabulary
//! - ContextStep: compiled wire-level path tokens
//! - Projection / ReturnKind / OpCode / WireOp: terminal operation model
//! - MutationKind / MapWritePolicy: the value-mutation side
//! - Error: error type hierarchy
//!
//! Everything here is pure data with wire-word accessors; the state
//! machine, compiler, and dispatch engine live in `keyhole-chain`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod context;
pub mod error;
pub mod op;
pub mod selector;
pub mod value;

// Re-export commonly used types at the crate root
pub use context::{ContextStep, CTX_CREATE};
pub use error::{Error, Request, Result};
pub use op::{MapWritePolicy, MutationKind, OpCode, Projection, ReturnKind, WireOp};
pub use selector::{ListCreate, ListOrder, MapOrder, Selector, SelectorKind};
pub use value::Value;
