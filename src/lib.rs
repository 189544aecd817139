//! Keyhole - selector-chain compiler for nested document operations
//!
//! Keyhole lets a caller address and operate on elements nested
//! arbitrarily deep inside document values (ordered lists and
//! ordered/unordered maps) stored in a remote key-value store, without
//! hand-writing wire-protocol selector structures. A chain of selector
//! calls walks into the nested structure; a terminal call compiles the
//! chain into a context path plus a single wire operation descriptor.
//!
//! # Quick Start
//!
//! ```ignore
//! use keyhole::{map_key, Value};
//!
//! // Read the values of the third entry of the map under key "scores"
//! let op = map_key("scores").map_index(2)?.values()?;
//!
//! // Insert under a nested key, tolerating an existing entry
//! let op = map_key("profile").map_key("tags")?.insert("new", true)?;
//!
//! // Path-only: a context array for plain document-addressing calls
//! let ctx = map_key("a").list_index(0)?.into_context()?;
//! ```
//!
//! # Architecture
//!
//! The data model (values, selectors, wire descriptors, errors) lives in
//! `keyhole-core`; the state machine, compiler, dispatch engine, and
//! typestate builder live in `keyhole-chain`. This crate re-exports the
//! public surface of both. Executing the compiled operations against a
//! store is the consuming client's concern - Keyhole performs no I/O.

// Re-export the public API from the member crates
pub use keyhole_chain::*;
pub use keyhole_core::*;
