//! Capability protocol: the typestate chain builder
//!
//! Every selector method returns a [`Chain`] parameterized by a marker
//! describing what the pending selector can still do, so that illegal
//! follow-ons (inverting a single-element selector, asking a list for
//! keys, chaining past a range) are compile errors. The runtime checks in
//! the compiler and dispatch engine stay in force underneath: the marker
//! layer exists to catch mistakes as early as possible, not to replace
//! the checks.
//!
//! ## Markers
//!
//! | Marker | Pending kinds | Extra surface |
//! |---|---|---|
//! | [`MapKeyPoint`] | map-by-key | setters |
//! | [`MapPoint`] | map-by-index, map-by-rank | |
//! | [`ListIndexPoint`] | list-by-index | `set_to`, `add` |
//! | [`ListPoint`] | list-by-rank | |
//! | [`MapMatch`] | map-by-value | inverted terminals |
//! | [`ListMatch`] | list-by-value | inverted terminals |
//! | [`MapSpan`] | map ranges/lists/relative spans | inverted terminals, no further navigation |
//!
//! Chains start from the free functions in this module ([`map_key`],
//! [`list_index`], [`map_value_range`], …), each of which seeds a fresh
//! [`PathState`].

use crate::dispatch::{dispatch, mutate};
use crate::state::PathState;
use keyhole_core::{
    ContextStep, ListCreate, ListOrder, MapOrder, MutationKind, Projection, Result, Selector,
    Value, WireOp,
};
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// Marker for what the chain's pending selector is
pub trait Target: sealed::Sealed {}

/// The pending selector can be followed by further navigation
pub trait Navigable: Target {}

/// The pending selector addresses keyed (map) elements
pub trait Keyed: Target {}

/// The pending selector supports positional (index/rank) projections
pub trait Locatable: Target {}

/// The pending selector supports "all others" (inverted) terminals
pub trait Invertible: Target {}

/// Pending selector is map-by-key
#[derive(Debug)]
pub enum MapKeyPoint {}

/// Pending selector is map-by-index or map-by-rank
#[derive(Debug)]
pub enum MapPoint {}

/// Pending selector is list-by-index
#[derive(Debug)]
pub enum ListIndexPoint {}

/// Pending selector is list-by-rank
#[derive(Debug)]
pub enum ListPoint {}

/// Pending selector is map-by-value
#[derive(Debug)]
pub enum MapMatch {}

/// Pending selector is list-by-value
#[derive(Debug)]
pub enum ListMatch {}

/// Pending selector is a map range/list/relative-range span
#[derive(Debug)]
pub enum MapSpan {}

impl sealed::Sealed for MapKeyPoint {}
impl sealed::Sealed for MapPoint {}
impl sealed::Sealed for ListIndexPoint {}
impl sealed::Sealed for ListPoint {}
impl sealed::Sealed for MapMatch {}
impl sealed::Sealed for ListMatch {}
impl sealed::Sealed for MapSpan {}

impl Target for MapKeyPoint {}
impl Target for MapPoint {}
impl Target for ListIndexPoint {}
impl Target for ListPoint {}
impl Target for MapMatch {}
impl Target for ListMatch {}
impl Target for MapSpan {}

impl Navigable for MapKeyPoint {}
impl Navigable for MapPoint {}
impl Navigable for ListIndexPoint {}
impl Navigable for ListPoint {}
impl Navigable for MapMatch {}
impl Navigable for ListMatch {}

impl Keyed for MapKeyPoint {}
impl Keyed for MapPoint {}
impl Keyed for MapMatch {}
impl Keyed for MapSpan {}

impl Locatable for MapKeyPoint {}
impl Locatable for MapPoint {}
impl Locatable for ListIndexPoint {}
impl Locatable for ListPoint {}
impl Locatable for MapMatch {}
impl Locatable for MapSpan {}

impl Invertible for MapMatch {}
impl Invertible for ListMatch {}
impl Invertible for MapSpan {}

/// A selector chain with its capability marker
///
/// Linear and single-owner: every method takes `self` by value, so a chain
/// cannot be branched or reused after a terminal call.
#[derive(Debug)]
pub struct Chain<T: Target> {
    state: PathState,
    _target: PhantomData<T>,
}

impl<T: Target> Chain<T> {
    fn start(selector: Selector) -> Self {
        Chain {
            state: PathState::begin(selector),
            _target: PhantomData,
        }
    }

    fn step<U: Target>(self, next: Selector) -> Result<Chain<U>> {
        Ok(Chain {
            state: self.state.commit(next)?,
            _target: PhantomData,
        })
    }
}

// =============================================================================
// Chain entry points
// =============================================================================

/// Start a chain at the map entry with `key`
pub fn map_key(key: impl Into<Value>) -> Chain<MapKeyPoint> {
    Chain::start(Selector::MapByKey {
        key: key.into(),
        create: None,
    })
}

/// Start a chain at the map entry with `key`, creating the map on a
/// missing path
pub fn map_key_create(key: impl Into<Value>, order: MapOrder) -> Chain<MapKeyPoint> {
    Chain::start(Selector::MapByKey {
        key: key.into(),
        create: Some(order),
    })
}

/// Start a chain at the map entry at `index`
pub fn map_index(index: i64) -> Chain<MapPoint> {
    Chain::start(Selector::MapByIndex { index })
}

/// Start a chain at the map entry at value rank `rank`
pub fn map_rank(rank: i64) -> Chain<MapPoint> {
    Chain::start(Selector::MapByRank { rank })
}

/// Start a chain at the map entries holding `value`
pub fn map_value(value: impl Into<Value>) -> Chain<MapMatch> {
    Chain::start(Selector::MapByValue {
        value: value.into(),
    })
}

/// Start a chain at the list element at `index`
pub fn list_index(index: i64) -> Chain<ListIndexPoint> {
    Chain::start(Selector::ListByIndex {
        index,
        create: None,
    })
}

/// Start a chain at the list element at `index`, creating the list on a
/// missing path
pub fn list_index_create(index: i64, order: ListOrder, pad: bool) -> Chain<ListIndexPoint> {
    Chain::start(Selector::ListByIndex {
        index,
        create: Some(ListCreate { order, pad }),
    })
}

/// Start a chain at the list element at value rank `rank`
pub fn list_rank(rank: i64) -> Chain<ListPoint> {
    Chain::start(Selector::ListByRank { rank })
}

/// Start a chain at the list elements holding `value`
pub fn list_value(value: impl Into<Value>) -> Chain<ListMatch> {
    Chain::start(Selector::ListByValue {
        value: value.into(),
    })
}

/// Start a chain at the map entries in an index span
pub fn map_index_range(index: i64, count: Option<i64>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByIndexRange { index, count })
}

/// Start a chain at the map entries matching any listed key
pub fn map_key_list(keys: impl IntoIterator<Item = impl Into<Value>>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByKeyList {
        keys: keys.into_iter().map(Into::into).collect(),
    })
}

/// Start a chain at the map entries with keys in `[begin, end)`
pub fn map_key_range(begin: Option<Value>, end: Option<Value>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByKeyRange { begin, end })
}

/// Start a chain at the map entries in an index span relative to `key`
pub fn map_key_relative_index_range(
    key: impl Into<Value>,
    index: i64,
    count: Option<i64>,
) -> Chain<MapSpan> {
    Chain::start(Selector::MapByKeyRelativeIndexRange {
        key: key.into(),
        index,
        count,
    })
}

/// Start a chain at the map entries in a rank span
pub fn map_rank_range(rank: i64, count: Option<i64>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByRankRange { rank, count })
}

/// Start a chain at the map entries holding any listed value
pub fn map_value_list(values: impl IntoIterator<Item = impl Into<Value>>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByValueList {
        values: values.into_iter().map(Into::into).collect(),
    })
}

/// Start a chain at the map entries with values in `[begin, end)`
pub fn map_value_range(begin: Option<Value>, end: Option<Value>) -> Chain<MapSpan> {
    Chain::start(Selector::MapByValueRange { begin, end })
}

/// Start a chain at the map entries in a rank span relative to `value`
pub fn map_value_relative_rank_range(
    value: impl Into<Value>,
    rank: i64,
    count: Option<i64>,
) -> Chain<MapSpan> {
    Chain::start(Selector::MapByValueRelativeRankRange {
        value: value.into(),
        rank,
        count,
    })
}

// =============================================================================
// Navigation
// =============================================================================

impl<T: Navigable> Chain<T> {
    /// Descend into the map entry with `key`
    pub fn map_key(self, key: impl Into<Value>) -> Result<Chain<MapKeyPoint>> {
        self.step(Selector::MapByKey {
            key: key.into(),
            create: None,
        })
    }

    /// Descend into the map entry with `key`, creating the map on a
    /// missing path
    pub fn map_key_create(
        self,
        key: impl Into<Value>,
        order: MapOrder,
    ) -> Result<Chain<MapKeyPoint>> {
        self.step(Selector::MapByKey {
            key: key.into(),
            create: Some(order),
        })
    }

    /// Descend into the map entry at `index`
    pub fn map_index(self, index: i64) -> Result<Chain<MapPoint>> {
        self.step(Selector::MapByIndex { index })
    }

    /// Descend into the map entry at value rank `rank`
    pub fn map_rank(self, rank: i64) -> Result<Chain<MapPoint>> {
        self.step(Selector::MapByRank { rank })
    }

    /// Descend into the map entries holding `value`
    pub fn map_value(self, value: impl Into<Value>) -> Result<Chain<MapMatch>> {
        self.step(Selector::MapByValue {
            value: value.into(),
        })
    }

    /// Descend into the list element at `index`
    pub fn list_index(self, index: i64) -> Result<Chain<ListIndexPoint>> {
        self.step(Selector::ListByIndex {
            index,
            create: None,
        })
    }

    /// Descend into the list element at `index`, creating the list on a
    /// missing path
    pub fn list_index_create(
        self,
        index: i64,
        order: ListOrder,
        pad: bool,
    ) -> Result<Chain<ListIndexPoint>> {
        self.step(Selector::ListByIndex {
            index,
            create: Some(ListCreate { order, pad }),
        })
    }

    /// Descend into the list element at value rank `rank`
    pub fn list_rank(self, rank: i64) -> Result<Chain<ListPoint>> {
        self.step(Selector::ListByRank { rank })
    }

    /// Descend into the list elements holding `value`
    pub fn list_value(self, value: impl Into<Value>) -> Result<Chain<ListMatch>> {
        self.step(Selector::ListByValue {
            value: value.into(),
        })
    }

    /// Terminate with the map entries in an index span
    pub fn map_index_range(self, index: i64, count: Option<i64>) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByIndexRange { index, count })
    }

    /// Terminate with the map entries matching any listed key
    pub fn map_key_list(
        self,
        keys: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByKeyList {
            keys: keys.into_iter().map(Into::into).collect(),
        })
    }

    /// Terminate with the map entries with keys in `[begin, end)`
    pub fn map_key_range(
        self,
        begin: Option<Value>,
        end: Option<Value>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByKeyRange { begin, end })
    }

    /// Terminate with the map entries in an index span relative to `key`
    pub fn map_key_relative_index_range(
        self,
        key: impl Into<Value>,
        index: i64,
        count: Option<i64>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByKeyRelativeIndexRange {
            key: key.into(),
            index,
            count,
        })
    }

    /// Terminate with the map entries in a rank span
    pub fn map_rank_range(self, rank: i64, count: Option<i64>) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByRankRange { rank, count })
    }

    /// Terminate with the map entries holding any listed value
    pub fn map_value_list(
        self,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByValueList {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Terminate with the map entries with values in `[begin, end)`
    pub fn map_value_range(
        self,
        begin: Option<Value>,
        end: Option<Value>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByValueRange { begin, end })
    }

    /// Terminate with the map entries in a rank span relative to `value`
    pub fn map_value_relative_rank_range(
        self,
        value: impl Into<Value>,
        rank: i64,
        count: Option<i64>,
    ) -> Result<Chain<MapSpan>> {
        self.step(Selector::MapByValueRelativeRankRange {
            value: value.into(),
            rank,
            count,
        })
    }

    /// Compile the whole chain, pending selector included, into a context
    /// array for plain document-addressing calls
    pub fn into_context(self) -> Result<Vec<ContextStep>> {
        self.state.into_context()
    }
}

// =============================================================================
// Terminals
// =============================================================================

impl<T: Target> Chain<T> {
    /// Get the matched values
    pub fn values(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Values, false)
    }

    /// Count the matched elements
    pub fn count(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Count, false)
    }

    /// Remove the matched elements without reading them
    pub fn remove(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::None, false)
    }
}

impl<T: Locatable> Chain<T> {
    /// Get the index positions of the matched elements
    pub fn index(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Index, false)
    }

    /// Get the index positions counted from the end
    pub fn reverse_index(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::ReverseIndex, false)
    }

    /// Get the value ranks of the matched elements
    pub fn rank(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Rank, false)
    }

    /// Get the value ranks counted from the highest
    pub fn reverse_rank(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::ReverseRank, false)
    }
}

impl<T: Keyed> Chain<T> {
    /// Get the matched keys
    pub fn keys(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Keys, false)
    }

    /// Get the matched key/value pairs
    pub fn key_values(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::KeyAndValue, false)
    }
}

impl<T: Invertible> Chain<T> {
    /// Get the values of everything except the matched elements
    pub fn all_other_values(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Values, true)
    }

    /// Count everything except the matched elements
    pub fn all_other_count(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Count, true)
    }

    /// Remove everything except the matched elements
    pub fn remove_all_others(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::None, true)
    }
}

impl<T: Invertible + Locatable> Chain<T> {
    /// Get the index positions of everything except the matched elements
    pub fn all_other_index(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Index, true)
    }

    /// Get the from-the-end index positions of everything except the
    /// matched elements
    pub fn all_other_reverse_index(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::ReverseIndex, true)
    }

    /// Get the value ranks of everything except the matched elements
    pub fn all_other_rank(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Rank, true)
    }

    /// Get the from-the-highest value ranks of everything except the
    /// matched elements
    pub fn all_other_reverse_rank(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::ReverseRank, true)
    }
}

impl<T: Invertible + Keyed> Chain<T> {
    /// Get the keys of everything except the matched entries
    pub fn all_other_keys(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::Keys, true)
    }

    /// Get the key/value pairs of everything except the matched entries
    pub fn all_other_key_values(self) -> Result<WireOp> {
        dispatch(&self.state, Projection::KeyAndValue, true)
    }
}

// =============================================================================
// Setters
// =============================================================================

impl Chain<MapKeyPoint> {
    /// Upsert the addressed entry to `value`
    pub fn set_to(self, value: impl Into<Value>) -> Result<WireOp> {
        mutate(&self.state, MutationKind::SetTo, value.into(), false)
    }

    /// Create the addressed entry with `value`
    ///
    /// Fails remotely if the key already exists, unless `allow_failures`
    /// turns the conflict into a silent no-op.
    pub fn insert(self, value: impl Into<Value>, allow_failures: bool) -> Result<WireOp> {
        mutate(
            &self.state,
            MutationKind::Insert,
            value.into(),
            allow_failures,
        )
    }

    /// Replace the addressed entry with `value`
    ///
    /// Fails remotely if the key is absent, unless `allow_failures` turns
    /// the miss into a silent no-op.
    pub fn update(self, value: impl Into<Value>, allow_failures: bool) -> Result<WireOp> {
        mutate(
            &self.state,
            MutationKind::Update,
            value.into(),
            allow_failures,
        )
    }

    /// Numerically increment the addressed entry by `delta`
    pub fn add(self, delta: impl Into<Value>, allow_failures: bool) -> Result<WireOp> {
        mutate(&self.state, MutationKind::Add, delta.into(), allow_failures)
    }
}

impl Chain<ListIndexPoint> {
    /// Set the addressed element to `value`
    pub fn set_to(self, value: impl Into<Value>) -> Result<WireOp> {
        mutate(&self.state, MutationKind::SetTo, value.into(), false)
    }

    /// Numerically increment the addressed element by `delta`
    pub fn add(self, delta: impl Into<Value>) -> Result<WireOp> {
        mutate(&self.state, MutationKind::Add, delta.into(), false)
    }
}
