//! Wire operation descriptors: projections, return flags, opcodes, policies
//!
//! This module defines the terminal side of the data model:
//! - Projection: the requested terminal shape
//! - ReturnKind: the store's return-type flag word, with the INVERTED bit
//! - OpCode: the concrete low-level request selector
//! - MutationKind / MapWritePolicy: the value-mutation side
//! - WireOp: the single operation descriptor handed to the accumulator
//!
//! The dispatch engine owns the legality table; everything here is passive
//! data with wire-word accessors.

use crate::context::ContextStep;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Projection and ReturnKind
// =============================================================================

/// Requested terminal shape
///
/// Each projection may be requested in normal or "all others" (inverted)
/// mode; inversion is a separate flag on the dispatch call, not part of
/// the projection itself. `Projection::None` is remove-without-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// Matched values
    Values,
    /// Matched keys
    Keys,
    /// Number of matched elements
    Count,
    /// Index positions of matched elements
    Index,
    /// Index positions counted from the end
    ReverseIndex,
    /// Value ranks of matched elements
    Rank,
    /// Value ranks counted from the highest
    ReverseRank,
    /// Matched key/value pairs
    KeyAndValue,
    /// Nothing: remove the matched elements without reading them
    None,
}

impl Projection {
    /// All projections, in declaration order
    pub const ALL: [Projection; 9] = [
        Projection::Values,
        Projection::Keys,
        Projection::Count,
        Projection::Index,
        Projection::ReverseIndex,
        Projection::Rank,
        Projection::ReverseRank,
        Projection::KeyAndValue,
        Projection::None,
    ];

    /// The store return-type flag of the same name
    pub fn return_kind(&self) -> ReturnKind {
        match self {
            Projection::Values => ReturnKind::Values,
            Projection::Keys => ReturnKind::Keys,
            Projection::Count => ReturnKind::Count,
            Projection::Index => ReturnKind::Index,
            Projection::ReverseIndex => ReturnKind::ReverseIndex,
            Projection::Rank => ReturnKind::Rank,
            Projection::ReverseRank => ReturnKind::ReverseRank,
            Projection::KeyAndValue => ReturnKind::KeyAndValue,
            Projection::None => ReturnKind::None,
        }
    }

    /// Does this projection require keyed elements?
    pub fn needs_key(&self) -> bool {
        matches!(self, Projection::Keys | Projection::KeyAndValue)
    }

    /// Does this projection report element positions (index/rank)?
    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            Projection::Index
                | Projection::ReverseIndex
                | Projection::Rank
                | Projection::ReverseRank
        )
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Projection::Values => "values",
            Projection::Keys => "keys",
            Projection::Count => "count",
            Projection::Index => "index",
            Projection::ReverseIndex => "reverse-index",
            Projection::Rank => "rank",
            Projection::ReverseRank => "reverse-rank",
            Projection::KeyAndValue => "key-and-value",
            Projection::None => "removal",
        };
        f.write_str(name)
    }
}

/// Store return-type flag
///
/// The numeric word goes on the wire as-is; inverted requests OR in
/// [`ReturnKind::INVERTED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnKind {
    /// No payload returned
    None = 0x00,
    /// Index positions
    Index = 0x01,
    /// Index positions from the end
    ReverseIndex = 0x02,
    /// Value ranks
    Rank = 0x03,
    /// Value ranks from the highest
    ReverseRank = 0x04,
    /// Element count
    Count = 0x05,
    /// Keys
    Keys = 0x06,
    /// Values
    Values = 0x07,
    /// Key/value pairs
    KeyAndValue = 0x08,
}

impl ReturnKind {
    /// Flag bit marking an "all others" request
    pub const INVERTED: u32 = 0x1_0000;

    /// Full flag word for this return kind
    pub fn flag(self, inverted: bool) -> u32 {
        let base = self as u32;
        if inverted {
            base | Self::INVERTED
        } else {
            base
        }
    }
}

// =============================================================================
// OpCode
// =============================================================================

/// Concrete low-level request selector
///
/// One variant per wire request the dispatch engine can emit. Map reads
/// live in the 0x60 block, map removes in 0x70, map mutations at 0x7E/0x7F;
/// list reads in 0x40, list removes in 0x50, list mutations at 0x5E/0x5F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)] // variant names restate the request verbatim
pub enum OpCode {
    // Map reads
    MapGetByIndex = 0x60,
    MapGetByIndexRange = 0x61,
    MapGetByKey = 0x62,
    MapGetByKeyList = 0x63,
    MapGetByKeyRange = 0x64,
    MapGetByKeyRelIndexRange = 0x65,
    MapGetByRank = 0x66,
    MapGetByRankRange = 0x67,
    MapGetByValue = 0x68,
    MapGetByValueList = 0x69,
    MapGetByValueRange = 0x6A,
    MapGetByValueRelRankRange = 0x6B,
    // Map removes
    MapRemoveByIndex = 0x70,
    MapRemoveByIndexRange = 0x71,
    MapRemoveByKey = 0x72,
    MapRemoveByKeyList = 0x73,
    MapRemoveByKeyRange = 0x74,
    MapRemoveByKeyRelIndexRange = 0x75,
    MapRemoveByRank = 0x76,
    MapRemoveByRankRange = 0x77,
    MapRemoveByValue = 0x78,
    MapRemoveByValueList = 0x79,
    MapRemoveByValueRange = 0x7A,
    MapRemoveByValueRelRankRange = 0x7B,
    // Map mutations
    MapPut = 0x7E,
    MapIncrement = 0x7F,
    // List reads
    ListGetByIndex = 0x40,
    ListGetByRank = 0x41,
    ListGetByValue = 0x42,
    // List removes
    ListRemoveByIndex = 0x50,
    ListRemoveByRank = 0x51,
    ListRemoveByValue = 0x52,
    // List mutations
    ListSet = 0x5E,
    ListIncrement = 0x5F,
}

impl OpCode {
    /// Wire byte for this opcode
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Does this opcode target a map?
    pub fn is_map(&self) -> bool {
        self.as_byte() >= 0x60
    }

    /// Is this a mutation opcode (no return flag word)?
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            OpCode::MapPut | OpCode::MapIncrement | OpCode::ListSet | OpCode::ListIncrement
        )
    }
}

// =============================================================================
// Mutations and write policies
// =============================================================================

/// Value-mutation request kind for the setter path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// Upsert the addressed entry
    SetTo,
    /// Create the entry; the key must not exist yet
    Insert,
    /// Replace the entry; the key must already exist
    Update,
    /// Numeric increment of the existing entry
    Add,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::SetTo => "set-to",
            MutationKind::Insert => "insert",
            MutationKind::Update => "update",
            MutationKind::Add => "add",
        };
        f.write_str(name)
    }
}

/// Conflict-resolution rule applied by a map mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapWritePolicy {
    /// Upsert: create or replace
    Default,
    /// Create only; fail if the key exists
    CreateOnly,
    /// Create only; silently no-op if the key exists
    CreateOnlyNoFail,
    /// Update only; fail if the key is absent
    UpdateOnly,
    /// Update only; silently no-op if the key is absent
    UpdateOnlyNoFail,
}

impl MapWritePolicy {
    const CREATE_ONLY: u8 = 0x01;
    const UPDATE_ONLY: u8 = 0x02;
    const NO_FAIL: u8 = 0x04;

    /// Wire flag word for this policy
    pub fn flags(&self) -> u8 {
        match self {
            MapWritePolicy::Default => 0,
            MapWritePolicy::CreateOnly => Self::CREATE_ONLY,
            MapWritePolicy::CreateOnlyNoFail => Self::CREATE_ONLY | Self::NO_FAIL,
            MapWritePolicy::UpdateOnly => Self::UPDATE_ONLY,
            MapWritePolicy::UpdateOnlyNoFail => Self::UPDATE_ONLY | Self::NO_FAIL,
        }
    }

    /// Select the policy for a mutation request
    ///
    /// `SetTo` always upserts. `Insert` is create-only, `Update` and `Add`
    /// are update-only; `allow_failures` swaps in the silent no-op variant
    /// of either family.
    pub fn for_mutation(kind: MutationKind, allow_failures: bool) -> Self {
        match (kind, allow_failures) {
            (MutationKind::SetTo, _) => MapWritePolicy::Default,
            (MutationKind::Insert, false) => MapWritePolicy::CreateOnly,
            (MutationKind::Insert, true) => MapWritePolicy::CreateOnlyNoFail,
            (MutationKind::Update, false) | (MutationKind::Add, false) => {
                MapWritePolicy::UpdateOnly
            }
            (MutationKind::Update, true) | (MutationKind::Add, true) => {
                MapWritePolicy::UpdateOnlyNoFail
            }
        }
    }
}

// =============================================================================
// WireOp
// =============================================================================

/// The single wire operation descriptor emitted by a terminal dispatch
///
/// Plain immutable data, ready for an operation-list accumulator. Either a
/// fully legal operation is produced or none is; the dispatch engine never
/// emits a partial descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireOp {
    /// Concrete request selector
    pub code: OpCode,
    /// Compiled context path to the nested location (outermost first)
    pub ctx: Vec<ContextStep>,
    /// Return-type flag word; `None` for mutations
    pub ret: Option<u32>,
    /// Positional wire arguments, in address-form order
    pub args: Vec<Value>,
    /// Write policy; `Some` only for map mutations
    pub policy: Option<MapWritePolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_flag_words() {
        assert_eq!(ReturnKind::None.flag(false), 0x00);
        assert_eq!(ReturnKind::Values.flag(false), 0x07);
        assert_eq!(ReturnKind::Count.flag(true), 0x1_0005);
        assert_eq!(ReturnKind::None.flag(true), 0x1_0000);
        assert_eq!(ReturnKind::KeyAndValue.flag(false), 0x08);
    }

    #[test]
    fn test_projection_to_return_kind() {
        for projection in Projection::ALL {
            let kind = projection.return_kind();
            // flag word round-trips the base value without the INVERTED bit
            assert_eq!(kind.flag(false) & ReturnKind::INVERTED, 0);
        }
        assert_eq!(Projection::Values.return_kind(), ReturnKind::Values);
        assert_eq!(Projection::None.return_kind(), ReturnKind::None);
    }

    #[test]
    fn test_projection_predicates() {
        assert!(Projection::Keys.needs_key());
        assert!(Projection::KeyAndValue.needs_key());
        assert!(!Projection::Values.needs_key());
        assert!(Projection::Rank.is_positional());
        assert!(Projection::ReverseIndex.is_positional());
        assert!(!Projection::Count.is_positional());
    }

    #[test]
    fn test_opcode_blocks() {
        assert!(OpCode::MapGetByKey.is_map());
        assert!(OpCode::MapRemoveByValueRange.is_map());
        assert!(!OpCode::ListGetByValue.is_map());
        assert!(!OpCode::ListSet.is_map());
        assert!(OpCode::MapPut.is_mutation());
        assert!(OpCode::ListIncrement.is_mutation());
        assert!(!OpCode::MapRemoveByKey.is_mutation());
    }

    #[test]
    fn test_write_policy_flags() {
        assert_eq!(MapWritePolicy::Default.flags(), 0x00);
        assert_eq!(MapWritePolicy::CreateOnly.flags(), 0x01);
        assert_eq!(MapWritePolicy::CreateOnlyNoFail.flags(), 0x05);
        assert_eq!(MapWritePolicy::UpdateOnly.flags(), 0x02);
        assert_eq!(MapWritePolicy::UpdateOnlyNoFail.flags(), 0x06);
    }

    #[test]
    fn test_policy_selection() {
        use super::MapWritePolicy as P;
        use super::MutationKind as M;
        assert_eq!(P::for_mutation(M::SetTo, false), P::Default);
        assert_eq!(P::for_mutation(M::SetTo, true), P::Default);
        assert_eq!(P::for_mutation(M::Insert, false), P::CreateOnly);
        assert_eq!(P::for_mutation(M::Insert, true), P::CreateOnlyNoFail);
        assert_eq!(P::for_mutation(M::Update, false), P::UpdateOnly);
        assert_eq!(P::for_mutation(M::Update, true), P::UpdateOnlyNoFail);
        assert_eq!(P::for_mutation(M::Add, false), P::UpdateOnly);
        assert_eq!(P::for_mutation(M::Add, true), P::UpdateOnlyNoFail);
    }
}
