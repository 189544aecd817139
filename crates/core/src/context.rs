//! Compiled context steps: the wire-level path tokens
//!
//! A committed selector compiles into exactly one `ContextStep`. The
//! ordered sequence of steps (outermost first) is the context path the
//! wire protocol uses to reach a nested location, either as the `ctx`
//! prefix of a wire operation or standalone for plain document-addressing
//! calls.
//!
//! ## Token Words
//!
//! | Step | Token |
//! |------|-------|
//! | ListIndex | 0x10 |
//! | ListRank | 0x11 |
//! | ListValue | 0x12 |
//! | MapIndex | 0x20 |
//! | MapKey | 0x21 |
//! | MapRank | 0x22 |
//! | MapValue | 0x23 |
//!
//! Create-capable forms OR in the `CTX_CREATE` bit (0x40); the creation
//! ordering rides in the step payload.

use crate::selector::{ListOrder, MapOrder};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Create bit OR'd into the token word of create-capable steps
pub const CTX_CREATE: u8 = 0x40;

/// One compiled step of a context path
///
/// Immutable once created. Consumers read the token word plus the wire
/// argument; creation payloads are exposed on the create variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContextStep {
    /// Descend into the list element at an index
    ListIndex {
        /// Index position
        index: i64,
    },
    /// Descend into the list element at an index, creating the list on a
    /// missing path
    ListIndexCreate {
        /// Index position
        index: i64,
        /// Ordering of the created list
        order: ListOrder,
        /// Null-fill up to the addressed index
        pad: bool,
    },
    /// Descend into the list element at a value rank
    ListRank {
        /// Rank position
        rank: i64,
    },
    /// Descend into the list element holding a value
    ListValue {
        /// Value to match
        value: Value,
    },
    /// Descend into the map entry at an index position
    MapIndex {
        /// Index position
        index: i64,
    },
    /// Descend into the map entry with a key
    MapKey {
        /// Entry key
        key: Value,
    },
    /// Descend into the map entry with a key, creating the map on a
    /// missing path
    MapKeyCreate {
        /// Entry key
        key: Value,
        /// Ordering of the created map
        order: MapOrder,
    },
    /// Descend into the map entry at a value rank
    MapRank {
        /// Rank position
        rank: i64,
    },
    /// Descend into the map entry holding a value
    MapValue {
        /// Value to match
        value: Value,
    },
}

impl ContextStep {
    /// Wire token word for this step
    pub fn token(&self) -> u8 {
        match self {
            ContextStep::ListIndex { .. } => 0x10,
            ContextStep::ListIndexCreate { .. } => 0x10 | CTX_CREATE,
            ContextStep::ListRank { .. } => 0x11,
            ContextStep::ListValue { .. } => 0x12,
            ContextStep::MapIndex { .. } => 0x20,
            ContextStep::MapKey { .. } => 0x21,
            ContextStep::MapKeyCreate { .. } => 0x21 | CTX_CREATE,
            ContextStep::MapRank { .. } => 0x22,
            ContextStep::MapValue { .. } => 0x23,
        }
    }

    /// Wire argument for this step
    ///
    /// Index/rank forms address by integer, key/value forms by the stored
    /// value.
    pub fn arg(&self) -> Value {
        match self {
            ContextStep::ListIndex { index }
            | ContextStep::ListIndexCreate { index, .. }
            | ContextStep::MapIndex { index } => Value::Int(*index),
            ContextStep::ListRank { rank } | ContextStep::MapRank { rank } => Value::Int(*rank),
            ContextStep::ListValue { value } | ContextStep::MapValue { value } => value.clone(),
            ContextStep::MapKey { key } | ContextStep::MapKeyCreate { key, .. } => key.clone(),
        }
    }

    /// Does this step create missing structure on the way down?
    pub fn creates(&self) -> bool {
        self.token() & CTX_CREATE != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_words() {
        assert_eq!(ContextStep::ListIndex { index: 0 }.token(), 0x10);
        assert_eq!(ContextStep::ListRank { rank: 0 }.token(), 0x11);
        assert_eq!(
            ContextStep::ListValue {
                value: Value::Int(1)
            }
            .token(),
            0x12
        );
        assert_eq!(ContextStep::MapIndex { index: 0 }.token(), 0x20);
        assert_eq!(
            ContextStep::MapKey {
                key: Value::from("k")
            }
            .token(),
            0x21
        );
        assert_eq!(ContextStep::MapRank { rank: 0 }.token(), 0x22);
        assert_eq!(
            ContextStep::MapValue {
                value: Value::Int(1)
            }
            .token(),
            0x23
        );
    }

    #[test]
    fn test_create_bit() {
        let step = ContextStep::MapKeyCreate {
            key: Value::from("k"),
            order: MapOrder::KeyOrdered,
        };
        assert_eq!(step.token(), 0x61);
        assert!(step.creates());

        let step = ContextStep::ListIndexCreate {
            index: 3,
            order: ListOrder::Unordered,
            pad: true,
        };
        assert_eq!(step.token(), 0x50);
        assert!(step.creates());

        assert!(!ContextStep::MapIndex { index: 0 }.creates());
    }

    #[test]
    fn test_wire_args() {
        assert_eq!(ContextStep::MapIndex { index: -1 }.arg(), Value::Int(-1));
        assert_eq!(
            ContextStep::MapKey {
                key: Value::from("k")
            }
            .arg(),
            Value::from("k")
        );
        assert_eq!(
            ContextStep::ListIndexCreate {
                index: 4,
                order: ListOrder::Ordered,
                pad: false,
            }
            .arg(),
            Value::Int(4)
        );
    }
}
