//! Dispatch engine: terminal requests to concrete wire operations
//!
//! Given the current pending selector (the terminal target, never
//! committed to the stack) and a requested projection, look up the legal
//! wire operation, enforcing invertibility and key-projection rules; the
//! setter path handles value mutations with write-policy selection.
//!
//! ## Legality Table
//!
//! | Pending kind | Non-inverted | Inverted |
//! |---|---|---|
//! | map single-element (by-index/key/rank) | every projection | rejected |
//! | list single-element (by-index/rank) | all but keys/key-and-value | rejected |
//! | map spans, map-by-value | every projection | every projection |
//! | list-by-value | values, count, removal | values, count, removal |
//!
//! `Keys` and `KeyAndValue` both fail on list kinds: list elements carry
//! no key, and the pair projection needs one just as much as the key
//! projection does.
//!
//! ## Removal Asymmetry
//!
//! Map removal returns the `None` flag, list removal returns `Count` — a
//! store-level asymmetry replicated as observed.
//!
//! Every illegal combination produces an error naming the selector kind
//! and the request; no partial wire operation is ever emitted.

use crate::state::PathState;
use keyhole_core::{
    Error, MapWritePolicy, MutationKind, OpCode, Projection, Request, Result, ReturnKind,
    Selector, SelectorKind, Value, WireOp,
};
use tracing::debug;

// =============================================================================
// Read / remove dispatch
// =============================================================================

/// Dispatch a terminal read or remove request
///
/// `projection` is the requested shape ([`Projection::None`] removes
/// without reading); `inverted` requests "all others" mode. The path state
/// is read exactly once and left untouched.
pub fn dispatch(state: &PathState, projection: Projection, inverted: bool) -> Result<WireOp> {
    let pending = state.pending();
    let kind = pending.kind();
    check_request(kind, projection, inverted)?;

    let removing = projection == Projection::None;
    let code = if removing {
        remove_opcode(kind)
    } else {
        read_opcode(kind)
    };
    // map removal returns nothing, list removal reports how many went
    let ret = if removing {
        if kind.is_list() {
            ReturnKind::Count.flag(inverted)
        } else {
            ReturnKind::None.flag(inverted)
        }
    } else {
        projection.return_kind().flag(inverted)
    };

    debug!(%kind, %projection, inverted, code = code.as_byte(), "dispatch terminal request");
    Ok(WireOp {
        code,
        ctx: state.context().to_vec(),
        ret: Some(ret),
        args: address_args(pending),
        policy: None,
    })
}

/// Reject (kind, projection, inverted) combinations the store cannot express
fn check_request(kind: SelectorKind, projection: Projection, inverted: bool) -> Result<()> {
    let reject = || {
        debug!(%kind, %projection, inverted, "rejecting unsupported terminal request");
        Err(Error::UnsupportedProjection {
            kind,
            request: Request::Read {
                projection,
                inverted,
            },
        })
    };

    // no representation for "everything except one element"
    if inverted && !kind.is_invertible() {
        return reject();
    }
    // list elements have no key
    if projection.needs_key() && kind.is_list() {
        return reject();
    }
    // by-value list matches report no positions either
    if projection.is_positional() && kind == SelectorKind::ListByValue {
        return reject();
    }
    Ok(())
}

/// Read opcode for an address form
fn read_opcode(kind: SelectorKind) -> OpCode {
    match kind {
        SelectorKind::MapByIndex => OpCode::MapGetByIndex,
        SelectorKind::MapByIndexRange => OpCode::MapGetByIndexRange,
        SelectorKind::MapByKey => OpCode::MapGetByKey,
        SelectorKind::MapByKeyList => OpCode::MapGetByKeyList,
        SelectorKind::MapByKeyRange => OpCode::MapGetByKeyRange,
        SelectorKind::MapByKeyRelativeIndexRange => OpCode::MapGetByKeyRelIndexRange,
        SelectorKind::MapByRank => OpCode::MapGetByRank,
        SelectorKind::MapByRankRange => OpCode::MapGetByRankRange,
        SelectorKind::MapByValue => OpCode::MapGetByValue,
        SelectorKind::MapByValueList => OpCode::MapGetByValueList,
        SelectorKind::MapByValueRange => OpCode::MapGetByValueRange,
        SelectorKind::MapByValueRelativeRankRange => OpCode::MapGetByValueRelRankRange,
        SelectorKind::ListByIndex => OpCode::ListGetByIndex,
        SelectorKind::ListByRank => OpCode::ListGetByRank,
        SelectorKind::ListByValue => OpCode::ListGetByValue,
    }
}

/// Remove opcode for an address form
fn remove_opcode(kind: SelectorKind) -> OpCode {
    match kind {
        SelectorKind::MapByIndex => OpCode::MapRemoveByIndex,
        SelectorKind::MapByIndexRange => OpCode::MapRemoveByIndexRange,
        SelectorKind::MapByKey => OpCode::MapRemoveByKey,
        SelectorKind::MapByKeyList => OpCode::MapRemoveByKeyList,
        SelectorKind::MapByKeyRange => OpCode::MapRemoveByKeyRange,
        SelectorKind::MapByKeyRelativeIndexRange => OpCode::MapRemoveByKeyRelIndexRange,
        SelectorKind::MapByRank => OpCode::MapRemoveByRank,
        SelectorKind::MapByRankRange => OpCode::MapRemoveByRankRange,
        SelectorKind::MapByValue => OpCode::MapRemoveByValue,
        SelectorKind::MapByValueList => OpCode::MapRemoveByValueList,
        SelectorKind::MapByValueRange => OpCode::MapRemoveByValueRange,
        SelectorKind::MapByValueRelativeRankRange => OpCode::MapRemoveByValueRelRankRange,
        SelectorKind::ListByIndex => OpCode::ListRemoveByIndex,
        SelectorKind::ListByRank => OpCode::ListRemoveByRank,
        SelectorKind::ListByValue => OpCode::ListRemoveByValue,
    }
}

/// Positional wire arguments for an address form
///
/// Range bounds encode an absent end as `Null`. The optional span count is
/// emitted only when present — a span with `count: None` addresses "to the
/// end of the container", while `Some(0)` is a real zero-length span. The
/// branch is on presence, never on the numeric value.
fn address_args(pending: &Selector) -> Vec<Value> {
    let mut args = match pending {
        Selector::MapByIndex { index } => vec![Value::Int(*index)],
        Selector::MapByIndexRange { index, .. } => vec![Value::Int(*index)],
        Selector::MapByKey { key, .. } => vec![key.clone()],
        Selector::MapByKeyList { keys } => vec![Value::List(keys.clone())],
        Selector::MapByKeyRange { begin, end } => vec![bound(begin), bound(end)],
        Selector::MapByKeyRelativeIndexRange { key, index, .. } => {
            vec![key.clone(), Value::Int(*index)]
        }
        Selector::MapByRank { rank } => vec![Value::Int(*rank)],
        Selector::MapByRankRange { rank, .. } => vec![Value::Int(*rank)],
        Selector::MapByValue { value } => vec![value.clone()],
        Selector::MapByValueList { values } => vec![Value::List(values.clone())],
        Selector::MapByValueRange { begin, end } => vec![bound(begin), bound(end)],
        Selector::MapByValueRelativeRankRange { value, rank, .. } => {
            vec![value.clone(), Value::Int(*rank)]
        }
        Selector::ListByIndex { index, .. } => vec![Value::Int(*index)],
        Selector::ListByRank { rank } => vec![Value::Int(*rank)],
        Selector::ListByValue { value } => vec![value.clone()],
    };
    if let Some(count) = span_count(pending) {
        args.push(Value::Int(count));
    }
    args
}

/// Range bound wire encoding: absent means unbounded
fn bound(value: &Option<Value>) -> Value {
    value.clone().unwrap_or(Value::Null)
}

/// The optional span count, where the address form has one
fn span_count(pending: &Selector) -> Option<i64> {
    match pending {
        Selector::MapByIndexRange { count, .. }
        | Selector::MapByKeyRelativeIndexRange { count, .. }
        | Selector::MapByRankRange { count, .. }
        | Selector::MapByValueRelativeRankRange { count, .. } => *count,
        _ => None,
    }
}

// =============================================================================
// Mutation dispatch (setter path)
// =============================================================================

/// Dispatch a terminal value mutation
///
/// Legal only for a pending `MapByKey` (all four mutation kinds) or
/// `ListByIndex` (`SetTo` and `Add`). `Add` requires a numeric payload.
/// The compiled context stack passes through unchanged: the mutation
/// targets exactly the location the chain navigated to.
pub fn mutate(
    state: &PathState,
    mutation: MutationKind,
    payload: Value,
    allow_failures: bool,
) -> Result<WireOp> {
    let reject = |kind: SelectorKind| {
        debug!(%kind, %mutation, "rejecting unsupported mutation");
        Err(Error::UnsupportedProjection {
            kind,
            request: Request::Mutation(mutation),
        })
    };

    match (state.pending(), mutation) {
        (Selector::MapByKey { key, .. }, _) => {
            if mutation == MutationKind::Add && !payload.is_numeric() {
                return reject(SelectorKind::MapByKey);
            }
            let code = if mutation == MutationKind::Add {
                OpCode::MapIncrement
            } else {
                OpCode::MapPut
            };
            let policy = MapWritePolicy::for_mutation(mutation, allow_failures);
            debug!(%mutation, ?policy, code = code.as_byte(), "dispatch map mutation");
            Ok(WireOp {
                code,
                ctx: state.context().to_vec(),
                ret: None,
                args: vec![key.clone(), payload],
                policy: Some(policy),
            })
        }
        (Selector::ListByIndex { index, .. }, MutationKind::SetTo) => {
            debug!(index, "dispatch list set");
            Ok(WireOp {
                code: OpCode::ListSet,
                ctx: state.context().to_vec(),
                ret: None,
                args: vec![Value::Int(*index), payload],
                policy: None,
            })
        }
        (Selector::ListByIndex { index, .. }, MutationKind::Add) => {
            if !payload.is_numeric() {
                return reject(SelectorKind::ListByIndex);
            }
            debug!(index, "dispatch list increment");
            Ok(WireOp {
                code: OpCode::ListIncrement,
                ctx: state.context().to_vec(),
                ret: None,
                args: vec![Value::Int(*index), payload],
                policy: None,
            })
        }
        (other, _) => reject(other.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_tables_cover_every_kind() {
        for kind in SelectorKind::ALL {
            let read = read_opcode(kind);
            let remove = remove_opcode(kind);
            assert_ne!(read, remove);
            assert_eq!(read.is_map(), !kind.is_list());
            assert_eq!(remove.is_map(), !kind.is_list());
            assert!(!read.is_mutation());
            assert!(!remove.is_mutation());
        }
    }

    #[test]
    fn test_span_count_presence_branches() {
        let unbounded = Selector::MapByIndexRange {
            index: 4,
            count: None,
        };
        assert_eq!(address_args(&unbounded), vec![Value::Int(4)]);

        let empty = Selector::MapByIndexRange {
            index: 4,
            count: Some(0),
        };
        assert_eq!(address_args(&empty), vec![Value::Int(4), Value::Int(0)]);
    }

    #[test]
    fn test_unbounded_range_encodes_null() {
        let range = Selector::MapByKeyRange {
            begin: Some(Value::from("a")),
            end: None,
        };
        assert_eq!(address_args(&range), vec![Value::from("a"), Value::Null]);
    }

    #[test]
    fn test_relative_range_arg_order() {
        let rel = Selector::MapByValueRelativeRankRange {
            value: Value::Int(7),
            rank: -2,
            count: Some(3),
        };
        assert_eq!(
            address_args(&rel),
            vec![Value::Int(7), Value::Int(-2), Value::Int(3)]
        );
    }
}
