//! Selector compiler: one committed selector to one wire context step
//!
//! Exhaustive over every selector kind. Only kinds that address exactly
//! one nested container to descend into are legal path steps; a span kind
//! reaching this function is a programming error in the call chain.
//!
//! Creation hints are consumed here: they move out of the selector payload
//! into the compiled step, so a hint cannot survive into the next pending
//! selector.

use keyhole_core::{ContextStep, Error, ListCreate, Result, Selector};
use tracing::debug;

/// Compile a committed selector into its wire context step
///
/// Fails with [`Error::IllegalPathStep`] for span kinds (ranges, lists,
/// relative ranges). The capability layer makes that unreachable through
/// the builder, but alternate front-ends feeding this compiler directly
/// get the same check.
pub fn compile(selector: Selector) -> Result<ContextStep> {
    match selector {
        Selector::MapByIndex { index } => Ok(ContextStep::MapIndex { index }),
        Selector::MapByKey { key, create: None } => Ok(ContextStep::MapKey { key }),
        Selector::MapByKey {
            key,
            create: Some(order),
        } => Ok(ContextStep::MapKeyCreate { key, order }),
        Selector::MapByRank { rank } => Ok(ContextStep::MapRank { rank }),
        Selector::MapByValue { value } => Ok(ContextStep::MapValue { value }),
        Selector::ListByIndex {
            index,
            create: None,
        } => Ok(ContextStep::ListIndex { index }),
        Selector::ListByIndex {
            index,
            create: Some(ListCreate { order, pad }),
        } => Ok(ContextStep::ListIndexCreate { index, order, pad }),
        Selector::ListByRank { rank } => Ok(ContextStep::ListRank { rank }),
        Selector::ListByValue { value } => Ok(ContextStep::ListValue { value }),
        other => {
            let kind = other.kind();
            debug!(%kind, "selector rejected as path step");
            Err(Error::IllegalPathStep { kind })
        }
    }
}
