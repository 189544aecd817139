//! Selector-chain conformance tests
//!
//! Workspace-level suite driving the public facade exactly as a consuming
//! client would: typed builder entry points, the raw engine surface an
//! alternate front-end would use, and the serialized shape of emitted
//! operations.
//!
//! # Test Organization
//!
//! - span_entry_points: every action-only entry compiles and dispatches
//! - engine_surface: raw PathState/dispatch rejections the typed builder
//!   makes unrepresentable
//! - value_normalization: native parameters normalize through `Into<Value>`
//! - wire_shape: emitted descriptors serialize as plain data

use keyhole::{
    dispatch, list_value, map_index_range, map_key, map_key_list, map_key_range,
    map_key_relative_index_range, map_rank_range, map_value_list, map_value_range,
    map_value_relative_rank_range, ContextStep, Error, OpCode, PathState, Projection, Request,
    ReturnKind, Selector, SelectorKind, Value,
};

// =============================================================================
// SPAN ENTRY POINTS
// =============================================================================

mod span_entry_points {
    use super::*;

    #[test]
    fn index_range() {
        let op = map_index_range(1, Some(4)).values().unwrap();
        assert_eq!(op.code, OpCode::MapGetByIndexRange);
        assert_eq!(op.args, vec![Value::Int(1), Value::Int(4)]);
        assert_eq!(op.ret, Some(0x07));
    }

    #[test]
    fn key_list() {
        let op = map_key_list(vec!["a", "b", "c"]).all_other_values().unwrap();
        assert_eq!(op.code, OpCode::MapGetByKeyList);
        assert_eq!(op.ret, Some(0x07 | ReturnKind::INVERTED));
        assert_eq!(
            op.args,
            vec![Value::List(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c"),
            ])]
        );
    }

    #[test]
    fn key_range() {
        let op = map_key_range(Some(Value::from("a")), None).keys().unwrap();
        assert_eq!(op.code, OpCode::MapGetByKeyRange);
        assert_eq!(op.args, vec![Value::from("a"), Value::Null]);
        assert_eq!(op.ret, Some(0x06));
    }

    #[test]
    fn key_relative_index_range() {
        let op = map_key_relative_index_range("pivot", -1, Some(2))
            .key_values()
            .unwrap();
        assert_eq!(op.code, OpCode::MapGetByKeyRelIndexRange);
        assert_eq!(
            op.args,
            vec![Value::from("pivot"), Value::Int(-1), Value::Int(2)]
        );
        assert_eq!(op.ret, Some(0x08));
    }

    #[test]
    fn rank_range() {
        let op = map_rank_range(0, None).all_other_rank().unwrap();
        assert_eq!(op.code, OpCode::MapGetByRankRange);
        assert_eq!(op.args, vec![Value::Int(0)]);
        assert_eq!(op.ret, Some(0x03 | ReturnKind::INVERTED));
    }

    #[test]
    fn value_list() {
        let op = map_value_list(vec![1i64, 2]).remove_all_others().unwrap();
        assert_eq!(op.code, OpCode::MapRemoveByValueList);
        assert_eq!(op.ret, Some(ReturnKind::INVERTED));
    }

    #[test]
    fn value_range() {
        let op = map_value_range(Some(Value::Int(1)), Some(Value::Int(10)))
            .index()
            .unwrap();
        assert_eq!(op.code, OpCode::MapGetByValueRange);
        assert_eq!(op.ret, Some(0x01));
    }

    #[test]
    fn value_relative_rank_range() {
        let op = map_value_relative_rank_range(5i64, 1, None).count().unwrap();
        assert_eq!(op.code, OpCode::MapGetByValueRelRankRange);
        assert_eq!(op.args, vec![Value::Int(5), Value::Int(1)]);
        assert_eq!(op.ret, Some(0x05));
    }

    #[test]
    fn span_after_navigation_keeps_the_prefix() {
        let op = map_key("outer")
            .map_rank_range(2, Some(3))
            .unwrap()
            .values()
            .unwrap();
        assert_eq!(
            op.ctx,
            vec![ContextStep::MapKey {
                key: Value::from("outer")
            }]
        );
        assert_eq!(op.args, vec![Value::Int(2), Value::Int(3)]);
    }
}

// =============================================================================
// ENGINE SURFACE (what the typed builder makes unrepresentable)
// =============================================================================

mod engine_surface {
    use super::*;

    /// map-index(0) -> inverted count: single-element kinds have no
    /// "all others" representation
    #[test]
    fn inverted_count_on_single_element_kind() {
        let state = PathState::begin(Selector::MapByIndex { index: 0 });
        let err = dispatch(&state, Projection::Count, true).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedProjection {
                kind: SelectorKind::MapByIndex,
                request: Request::Read {
                    projection: Projection::Count,
                    inverted: true,
                },
            }
        );
    }

    /// list-by-value -> keys: list elements carry no key
    #[test]
    fn keys_on_list_by_value() {
        let state = PathState::begin(Selector::ListByValue {
            value: Value::from("v"),
        });
        let err = dispatch(&state, Projection::Keys, false).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedProjection {
                kind: SelectorKind::ListByValue,
                request: Request::Read {
                    projection: Projection::Keys,
                    inverted: false,
                },
            }
        );
    }

    /// a span selector superseded mid-chain is an illegal path step
    #[test]
    fn span_selector_cannot_be_committed() {
        let state = PathState::begin(Selector::MapByKeyRange {
            begin: None,
            end: None,
        });
        let err = state
            .commit(Selector::MapByIndex { index: 0 })
            .unwrap_err();
        assert_eq!(
            err,
            Error::IllegalPathStep {
                kind: SelectorKind::MapByKeyRange
            }
        );
    }
}

// =============================================================================
// VALUE NORMALIZATION AT THE BOUNDARY
// =============================================================================

mod value_normalization {
    use super::*;

    #[test]
    fn native_parameters_normalize() {
        // integer map keys are as legal as strings
        let op = map_key(42i64).values().unwrap();
        assert_eq!(op.args, vec![Value::Int(42)]);

        let op = map_key("k").set_to(vec![1i64, 2, 3]).unwrap();
        assert_eq!(
            op.args[1],
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );

        let op = list_value(2.5f64).count().unwrap();
        assert_eq!(op.args, vec![Value::Float(2.5)]);
    }

    #[test]
    fn bytes_keys_stay_bytes() {
        let op = map_key(Value::bytes(*b"\x01\x02")).values().unwrap();
        assert_eq!(op.args, vec![Value::Bytes(vec![1, 2])]);
    }
}

// =============================================================================
// WIRE SHAPE
// =============================================================================

mod wire_shape {
    use super::*;

    /// Emitted descriptors are plain serializable data for the
    /// operation-list accumulator
    #[test]
    fn wire_op_serializes_as_plain_data() {
        let op = map_key("a").map_index(2).unwrap().values().unwrap();
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["code"], "MapGetByIndex");
        assert_eq!(json["ret"], 7);
        assert_eq!(json["policy"], serde_json::Value::Null);
        assert_eq!(json["ctx"][0]["MapKey"]["key"]["String"], "a");

        let back: keyhole::WireOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn context_steps_expose_wire_tokens_and_args() {
        let ctx = map_key("a").map_index(2).unwrap().into_context().unwrap();
        let tokens: Vec<u8> = ctx.iter().map(|s| s.token()).collect();
        assert_eq!(tokens, vec![0x21, 0x20]);
        assert_eq!(ctx[1].arg(), Value::Int(2));
    }
}
