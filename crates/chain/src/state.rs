//! PathState: the mutable cursor of a selector chain
//!
//! A `PathState` holds exactly one *pending* selector plus the ordered
//! stack of already-compiled context steps. [`PathState::commit`] is the
//! single mutating operation: compile the pending selector, push the step,
//! adopt the next selector.
//!
//! ## Lifecycle
//!
//! Created at the start of a chain (one pending selector, empty stack),
//! rebuilt by every subsequent selector call, read exactly once by
//! whichever terminal dispatch is invoked, then abandoned. `commit` takes
//! `self` by value, so a chain accidentally reused after its terminal call
//! is a move error rather than an aliasing hazard.
//!
//! ## Invariant
//!
//! The stack never contains the terminal selector; it is a pure prefix of
//! the addressing path, insertion order = navigation order (outermost
//! first).

use crate::compiler::compile;
use keyhole_core::{ContextStep, Result, Selector};
use smallvec::SmallVec;
use tracing::trace;

/// Mutable path-building state: one pending selector + compiled prefix
#[derive(Debug, Clone, PartialEq)]
pub struct PathState {
    /// The most recently specified, not-yet-committed selector
    pending: Selector,
    /// Compiled intermediate steps, outermost first
    stack: SmallVec<[ContextStep; 4]>,
}

impl PathState {
    /// Start a chain with its first selector and an empty stack
    pub fn begin(selector: Selector) -> Self {
        trace!(kind = %selector.kind(), "begin selector chain");
        PathState {
            pending: selector,
            stack: SmallVec::new(),
        }
    }

    /// Commit the pending selector to the stack and adopt `next`
    ///
    /// The single mutator. Called by every chaining method, never by a
    /// terminal. Fails with `IllegalPathStep` when the superseded selector
    /// cannot serve as an intermediate navigation step.
    pub fn commit(mut self, next: Selector) -> Result<Self> {
        let superseded = std::mem::replace(&mut self.pending, next);
        let step = compile(superseded)?;
        trace!(
            token = step.token(),
            depth = self.stack.len() + 1,
            "committed path step"
        );
        self.stack.push(step);
        Ok(self)
    }

    /// The pending (terminal-candidate) selector
    pub fn pending(&self) -> &Selector {
        &self.pending
    }

    /// The compiled context prefix, outermost first
    pub fn context(&self) -> &[ContextStep] {
        &self.stack
    }

    /// Number of committed steps
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Compile the whole chain, pending selector included, into a context
    /// array
    ///
    /// For path-only use: plain document-addressing calls take a context
    /// array with no terminal operation, so here the pending selector must
    /// itself be a valid path step.
    pub fn into_context(self) -> Result<Vec<ContextStep>> {
        let PathState { pending, stack } = self;
        let last = compile(pending)?;
        let mut ctx: Vec<ContextStep> = stack.into_vec();
        ctx.push(last);
        Ok(ctx)
    }
}
