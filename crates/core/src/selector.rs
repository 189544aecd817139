//! Selector vocabulary: one navigation/termination step in a chain
//!
//! This module defines:
//! - Selector: tagged union of every addressing step, payload per kind
//! - SelectorKind: fieldless classifier used for legality checks and errors
//! - MapOrder / ListOrder / ListCreate: structure-creation hints
//!
//! ## Payload Invariant
//!
//! The original client modeled selectors as a flat record
//! (`kind + int1..int3 + val1/val2 + values`) with the invariant "exactly
//! the fields implied by kind are populated". Here each variant carries
//! exactly its own payload, so the invariant holds by construction.
//!
//! ## Optional Range Count
//!
//! Range selectors address "from start offset to end of container" when
//! `count` is `None`, and exactly `count` elements when it is `Some`.
//! `Some(0)` is a legal zero-length range; presence is never inferred from
//! the numeric value.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering mode for a map created implicitly by a path step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapOrder {
    /// Hash-ordered entries
    Unordered = 0x00,
    /// Entries ordered by key
    KeyOrdered = 0x01,
    /// Entries ordered by key, with an additional value index
    KeyValueOrdered = 0x03,
}

impl MapOrder {
    /// Wire word for this order mode
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Ordering mode for a list created implicitly by a path step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOrder {
    /// Insertion-ordered elements
    Unordered = 0x00,
    /// Elements kept sorted by value
    Ordered = 0x01,
}

impl ListOrder {
    /// Wire word for this order mode
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Creation hint for an implicitly-created list at a `ListByIndex` step
///
/// `pad` requests that intermediate elements up to the target index be
/// filled with nulls when the list is shorter than the index addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCreate {
    /// Ordering of the created list
    pub order: ListOrder,
    /// Null-fill up to the addressed index
    pub pad: bool,
}

/// One navigation/termination step in a selector chain
///
/// Pure data: a selector has no behavior of its own. It is created by a
/// builder call and consumed either by the compiler (when superseded by the
/// next selector) or by the dispatch engine (when it is the terminal
/// target).
///
/// Creation hints (`create` on [`Selector::MapByKey`] and
/// [`Selector::ListByIndex`]) ride inside the variant payload; compiling
/// the selector consumes them, so a hint can never leak into the next
/// pending selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selector {
    /// Map entry at an index position
    MapByIndex {
        /// Index position (negative counts from the end)
        index: i64,
    },
    /// Map entries in an index span
    MapByIndexRange {
        /// Starting index
        index: i64,
        /// Number of entries; `None` means "to the end"
        count: Option<i64>,
    },
    /// Map entry with a key
    MapByKey {
        /// Entry key
        key: Value,
        /// Create the map here if the path does not exist yet
        create: Option<MapOrder>,
    },
    /// Map entries matching any of the listed keys
    MapByKeyList {
        /// Keys to match
        keys: Vec<Value>,
    },
    /// Map entries with keys in `[begin, end)`
    MapByKeyRange {
        /// Inclusive lower bound; `None` means unbounded
        begin: Option<Value>,
        /// Exclusive upper bound; `None` means unbounded
        end: Option<Value>,
    },
    /// Map entries in an index span relative to a key's position
    MapByKeyRelativeIndexRange {
        /// Anchor key
        key: Value,
        /// Offset from the anchor's index
        index: i64,
        /// Number of entries; `None` means "to the end"
        count: Option<i64>,
    },
    /// Map entry at a value rank
    MapByRank {
        /// Rank position (negative counts from the highest rank)
        rank: i64,
    },
    /// Map entries in a rank span
    MapByRankRange {
        /// Starting rank
        rank: i64,
        /// Number of entries; `None` means "to the end"
        count: Option<i64>,
    },
    /// Map entries holding a value
    MapByValue {
        /// Value to match
        value: Value,
    },
    /// Map entries holding any of the listed values
    MapByValueList {
        /// Values to match
        values: Vec<Value>,
    },
    /// Map entries with values in `[begin, end)`
    MapByValueRange {
        /// Inclusive lower bound; `None` means unbounded
        begin: Option<Value>,
        /// Exclusive upper bound; `None` means unbounded
        end: Option<Value>,
    },
    /// Map entries in a rank span relative to a value's rank
    MapByValueRelativeRankRange {
        /// Anchor value
        value: Value,
        /// Offset from the anchor's rank
        rank: i64,
        /// Number of entries; `None` means "to the end"
        count: Option<i64>,
    },
    /// List element at an index position
    ListByIndex {
        /// Index position (negative counts from the end)
        index: i64,
        /// Create the list here if the path does not exist yet
        create: Option<ListCreate>,
    },
    /// List element at a value rank
    ListByRank {
        /// Rank position (negative counts from the highest rank)
        rank: i64,
    },
    /// List elements holding a value
    ListByValue {
        /// Value to match
        value: Value,
    },
}

impl Selector {
    /// Classify this selector
    pub fn kind(&self) -> SelectorKind {
        match self {
            Selector::MapByIndex { .. } => SelectorKind::MapByIndex,
            Selector::MapByIndexRange { .. } => SelectorKind::MapByIndexRange,
            Selector::MapByKey { .. } => SelectorKind::MapByKey,
            Selector::MapByKeyList { .. } => SelectorKind::MapByKeyList,
            Selector::MapByKeyRange { .. } => SelectorKind::MapByKeyRange,
            Selector::MapByKeyRelativeIndexRange { .. } => {
                SelectorKind::MapByKeyRelativeIndexRange
            }
            Selector::MapByRank { .. } => SelectorKind::MapByRank,
            Selector::MapByRankRange { .. } => SelectorKind::MapByRankRange,
            Selector::MapByValue { .. } => SelectorKind::MapByValue,
            Selector::MapByValueList { .. } => SelectorKind::MapByValueList,
            Selector::MapByValueRange { .. } => SelectorKind::MapByValueRange,
            Selector::MapByValueRelativeRankRange { .. } => {
                SelectorKind::MapByValueRelativeRankRange
            }
            Selector::ListByIndex { .. } => SelectorKind::ListByIndex,
            Selector::ListByRank { .. } => SelectorKind::ListByRank,
            Selector::ListByValue { .. } => SelectorKind::ListByValue,
        }
    }
}

/// Fieldless selector classifier
///
/// Used by the compiler and dispatch engine for legality checks, and by
/// errors to name the offending kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorKind {
    /// Map entry at an index position
    MapByIndex,
    /// Map entries in an index span
    MapByIndexRange,
    /// Map entry with a key
    MapByKey,
    /// Map entries matching listed keys
    MapByKeyList,
    /// Map entries with keys in a range
    MapByKeyRange,
    /// Map entries in an index span relative to a key
    MapByKeyRelativeIndexRange,
    /// Map entry at a value rank
    MapByRank,
    /// Map entries in a rank span
    MapByRankRange,
    /// Map entries holding a value
    MapByValue,
    /// Map entries holding listed values
    MapByValueList,
    /// Map entries with values in a range
    MapByValueRange,
    /// Map entries in a rank span relative to a value
    MapByValueRelativeRankRange,
    /// List element at an index position
    ListByIndex,
    /// List element at a value rank
    ListByRank,
    /// List elements holding a value
    ListByValue,
}

impl SelectorKind {
    /// All selector kinds, in declaration order
    pub const ALL: [SelectorKind; 15] = [
        SelectorKind::MapByIndex,
        SelectorKind::MapByIndexRange,
        SelectorKind::MapByKey,
        SelectorKind::MapByKeyList,
        SelectorKind::MapByKeyRange,
        SelectorKind::MapByKeyRelativeIndexRange,
        SelectorKind::MapByRank,
        SelectorKind::MapByRankRange,
        SelectorKind::MapByValue,
        SelectorKind::MapByValueList,
        SelectorKind::MapByValueRange,
        SelectorKind::MapByValueRelativeRankRange,
        SelectorKind::ListByIndex,
        SelectorKind::ListByRank,
        SelectorKind::ListByValue,
    ];

    /// Can this kind serve as an intermediate path step?
    ///
    /// Only kinds that address exactly one nested container to descend
    /// into qualify. Span kinds (ranges, lists, relative ranges) address
    /// zero or more elements and can only terminate a chain.
    pub fn is_path_step(&self) -> bool {
        matches!(
            self,
            SelectorKind::MapByIndex
                | SelectorKind::MapByKey
                | SelectorKind::MapByRank
                | SelectorKind::MapByValue
                | SelectorKind::ListByIndex
                | SelectorKind::ListByRank
                | SelectorKind::ListByValue
        )
    }

    /// Does this kind address exactly one element?
    ///
    /// The store has no representation for "everything except one
    /// element", so these kinds reject every inverted projection.
    pub fn is_single_element(&self) -> bool {
        matches!(
            self,
            SelectorKind::MapByIndex
                | SelectorKind::MapByKey
                | SelectorKind::MapByRank
                | SelectorKind::ListByIndex
                | SelectorKind::ListByRank
        )
    }

    /// Does this kind support "all others" (inverted) requests?
    pub fn is_invertible(&self) -> bool {
        !self.is_single_element()
    }

    /// Does this kind address list elements (which carry no key)?
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            SelectorKind::ListByIndex | SelectorKind::ListByRank | SelectorKind::ListByValue
        )
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorKind::MapByIndex => "map-by-index",
            SelectorKind::MapByIndexRange => "map-by-index-range",
            SelectorKind::MapByKey => "map-by-key",
            SelectorKind::MapByKeyList => "map-by-key-list",
            SelectorKind::MapByKeyRange => "map-by-key-range",
            SelectorKind::MapByKeyRelativeIndexRange => "map-by-key-relative-index-range",
            SelectorKind::MapByRank => "map-by-rank",
            SelectorKind::MapByRankRange => "map-by-rank-range",
            SelectorKind::MapByValue => "map-by-value",
            SelectorKind::MapByValueList => "map-by-value-list",
            SelectorKind::MapByValueRange => "map-by-value-range",
            SelectorKind::MapByValueRelativeRankRange => "map-by-value-relative-rank-range",
            SelectorKind::ListByIndex => "list-by-index",
            SelectorKind::ListByRank => "list-by-rank",
            SelectorKind::ListByValue => "list-by-value",
        };
        f.write_str(name)
    }
}
