//! Sparse, integer-keyed collection of dynamic values.
//!
//! Elements live in a `BTreeMap<usize, Value>`. Construction always assigns
//! keys `0, 1, 2, ...` in source order, so a freshly built collection has a
//! dense key range. `push` may later leave gaps (see [`Collection::push`]).
//!
//! Positional operations (`first`, `to_array`, `slice`, `filter`,
//! `where_row`) walk the keys `0..count()` and assume that dense range.
//! On a gapped collection they still succeed, but missing keys read as
//! absent and higher keys fall outside the walk.

mod filter;

pub use filter::Projection;

use crate::core::{self, CollectionError, Result};
use crate::helpers::{self, object_filter, object_walk};
use crate::pagination::{PaginationConfig, Paginator};
use log::{debug, trace};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: BTreeMap<usize, Value>,
}

impl Collection {
    /// Builds a collection from `source`, keying elements `0, 1, 2, ...` in
    /// iteration order.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut collection = Self::default();
        collection.set_collection(source);
        collection
    }

    /// Builds a collection from a JSON container.
    ///
    /// Arrays contribute their items and objects their values, in order; the
    /// object's own keys are discarded. Null and scalars produce an empty
    /// collection.
    pub fn from_json(value: Value) -> Self {
        Self::new(helpers::into_entries(value))
    }

    /// Parses JSON text and builds a collection from it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(value))
    }

    /// Replaces every entry with the elements of `source`, re-keyed from 0.
    pub fn set_collection<I>(&mut self, source: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.items = source.into_iter().enumerate().collect();
        self
    }

    /// Wraps `source` in a new, independent collection. The receiver is
    /// left untouched.
    pub fn collect<I>(&self, source: I) -> Collection
    where
        I: IntoIterator<Item = Value>,
    {
        Collection::new(source)
    }

    /// Appends `item` after the highest key.
    ///
    /// When the current last element is structured (an object or array),
    /// `item` replaces the entry at key 0 instead. Callers that load rows
    /// one at a time rely on this, so it is kept as-is. On an empty
    /// collection the item lands at key 0.
    pub fn push(&mut self, item: Value) -> &mut Self {
        let key = match helpers::last(self) {
            Some((_, last)) if helpers::is_object(last) => {
                debug!("push: last element is structured, overwriting key 0");
                0
            }
            Some((last_key, _)) => last_key + 1,
            None => 0,
        };

        self.items.insert(key, item);
        self
    }

    /// Returns the first element, in key order `0..count()`, whose `column`
    /// loosely equals `value`.
    pub fn where_row(&self, column: &str, value: impl Into<Value>) -> Option<&Value> {
        let value = value.into();

        (0..self.count())
            .filter_map(|idx| self.items.get(&idx))
            .find(|element| {
                core::is_truthy(element)
                    && core::loose_eq(core::field(element, column).unwrap_or(&Value::Null), &value)
            })
    }

    /// Collects every element whose `column` loosely equals `value` into a
    /// new collection, preserving key order. Unlike `where_row` this visits
    /// all stored keys, gaps included.
    pub fn where_eq(&self, column: &str, value: impl Into<Value>) -> Collection {
        let value = value.into();
        let mut matches = Vec::new();

        object_filter(self, |element| {
            if core::loose_eq(core::field(element, column).unwrap_or(&Value::Null), &value) {
                matches.push(element.clone());
            }
        });

        trace!("where_eq({}): {} of {} matched", column, matches.len(), self.count());
        self.collect(matches)
    }

    /// Maps `element[column_2]` to `element[column_1]` for every entry.
    ///
    /// Keys are the string form of the key field (`"undefined"` when it is
    /// missing); a missing value field maps to null. When two entries share
    /// a key the later one wins.
    ///
    /// Integer-like keys come first in ascending order, then the remaining
    /// keys in first-insertion order.
    pub fn list(&self, column_1: &str, column_2: &str) -> Map<String, Value> {
        let mut listed = Map::new();

        object_walk(self, |element| {
            let key = core::property_key(core::field(element, column_2));
            let value = core::field(element, column_1)
                .cloned()
                .unwrap_or(Value::Null);
            listed.insert(key, value);
        });

        order_index_keys(listed)
    }

    /// `list` keyed by the `id` field.
    pub fn list_by_id(&self, column: &str) -> Map<String, Value> {
        self.list(column, "id")
    }

    /// Element at key 0, unless it is missing or falsy.
    pub fn first(&self) -> Option<&Value> {
        self.items.get(&0).filter(|element| core::is_truthy(element))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn has_one_element(&self) -> bool {
        self.count() == 1
    }

    /// True when the keys are exactly `0..count()`.
    pub fn is_dense(&self) -> bool {
        self.items
            .keys()
            .next_back()
            .is_none_or(|max| *max + 1 == self.items.len())
    }

    pub fn get(&self, key: usize) -> Option<&Value> {
        self.items.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.keys().copied()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Plain-data form of the collection: an object keyed by the decimal
    /// form of each key.
    pub fn to_json(&self) -> Value {
        helpers::simplify(self)
    }

    /// Dense copy of keys `0..count()`. Missing keys become null.
    pub fn to_array(&self) -> Vec<Value> {
        if !self.is_dense() {
            debug!(
                "to_array on a sparse collection: {} entries, max key {:?}",
                self.count(),
                self.items.keys().next_back()
            );
        }

        (0..self.count())
            .map(|idx| self.items.get(&idx).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Like [`to_array`](Self::to_array), but converts every element to its
    /// own array form: objects become their values, arrays stay as they are.
    /// Any other element (holes included) is an error.
    pub fn to_array_full(&self) -> Result<Vec<Value>> {
        (0..self.count())
            .map(|idx| match self.items.get(&idx) {
                Some(Value::Object(map)) => Ok(Value::Array(map.values().cloned().collect())),
                Some(array @ Value::Array(_)) => Ok(array.clone()),
                other => Err(CollectionError::NotConvertible {
                    index: idx,
                    kind: other.map_or("undefined", core::kind_name),
                }),
            })
            .collect()
    }

    /// Elements from `begin` up to `end`, with `end` included when
    /// `inclusive_end` is set.
    ///
    /// Negative bounds count back from the end and out-of-range bounds clamp,
    /// so this never fails.
    pub fn slice(&self, begin: isize, end: isize, inclusive_end: bool) -> Vec<Value> {
        let array = self.to_array();
        let end = if inclusive_end { end.saturating_add(1) } else { end };

        let start = clamp_index(begin, array.len());
        let stop = clamp_index(end, array.len());

        if stop <= start {
            return Vec::new();
        }
        array[start..stop].to_vec()
    }

    /// Starts a field projection over the elements. See [`Projection`].
    pub fn filter<S: AsRef<str>>(&self, fields: &[S]) -> Projection<'_> {
        Projection::new(self, fields)
    }

    /// Paginates the collection.
    ///
    /// A non-zero `count` declares the collection to already be the
    /// requested page of a larger result of that size.
    pub fn paginate(
        &self,
        current_page: usize,
        per_page: usize,
        number_of_pages: usize,
        count: usize,
    ) -> Paginator {
        Paginator::new(self, per_page, number_of_pages, current_page, count)
    }

    pub fn paginate_with(&self, config: &PaginationConfig) -> Paginator {
        self.paginate(
            config.current_page,
            config.per_page,
            config.number_of_pages,
            config.total_count,
        )
    }
}

/// Canonical array-index form: decimal, no leading zeros, below `u32::MAX`.
fn index_key(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|idx| *idx != u32::MAX && idx.to_string() == key)
}

fn order_index_keys(map: Map<String, Value>) -> Map<String, Value> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = map
        .into_iter()
        .partition(|(key, _)| index_key(key).is_some());
    indexed.sort_by_key(|(key, _)| index_key(key));

    indexed.into_iter().chain(named).collect()
}

fn clamp_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(len)
    }
}

/// Iterator over `(key, element)` pairs in ascending key order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, usize, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, element)| (*key, element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, element)| (*key, element))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (usize, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Value>> for Collection {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.count()))?;
        for (key, element) in self.iter() {
            map.serialize_entry(&key.to_string(), element)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    /// Accepts either a JSON array or an object; either way the entries are
    /// re-keyed from 0.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}
