//! Chain building, compilation, and dispatch for Keyhole
//!
//! This crate owns the behavior around the `keyhole-core` data model:
//! - PathState: the mutable path-building cursor (one pending selector +
//!   compiled context stack)
//! - compile: one committed selector to one wire context step
//! - dispatch / mutate: the terminal-request legality table and wire
//!   operation assembly
//! - Chain and its markers: the capability protocol steering which
//!   terminals and further selectors are reachable from each selector kind
//!
//! Pure, synchronous, in-process computation: no I/O, no retries, no
//! shared state. The builder is the intended front door; `PathState`,
//! `compile`, and `dispatch` stay public so an alternate front-end (e.g. a
//! textual path-expression tokenizer) can feed the same compiler.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod compiler;
pub mod dispatch;
pub mod state;

pub use builder::*;
pub use compiler::compile;
pub use dispatch::{dispatch, mutate};
pub use state::PathState;
