//! Traversal and inspection helpers shared by the collection operations.
//!
//! These are plain functions over values and collections; none of them keep
//! state between calls.

use crate::collection::Collection;
use serde_json::{Map, Value};

/// Anything whose entries can be visited in traversal order.
pub trait Walkable {
    fn walk<F>(&self, visitor: F)
    where
        F: FnMut(&Value);
}

impl Walkable for Collection {
    fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&Value),
    {
        for (_, element) in self.iter() {
            visitor(element);
        }
    }
}

/// Invokes `visitor` for each entry of `container` in traversal order.
pub fn object_walk<W, F>(container: &W, visitor: F)
where
    W: Walkable + ?Sized,
    F: FnMut(&Value),
{
    container.walk(visitor);
}

/// Invokes `predicate` for each entry; results are gathered by the caller
/// through the closure.
pub fn object_filter<W, F>(container: &W, mut predicate: F)
where
    W: Walkable + ?Sized,
    F: FnMut(&Value),
{
    container.walk(|element| predicate(element));
}

/// Consumes a container value into its entries, in traversal order.
pub fn into_entries(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    }
}

/// True for structured values (objects and arrays).
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// The entry stored under the highest key.
pub fn last(collection: &Collection) -> Option<(usize, &Value)> {
    collection.iter().next_back()
}

/// Plain-data copy of a collection: an object keyed by the decimal form of
/// each stored key.
pub fn simplify(collection: &Collection) -> Value {
    let map: Map<String, Value> = collection
        .iter()
        .map(|(key, element)| (key.to_string(), element.clone()))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walk_visits_entries_in_key_order() {
        let mut collection = Collection::new(vec![json!("a"), json!("b")]);
        collection.push(json!("c"));

        let mut seen = Vec::new();
        object_walk(&collection, |v| seen.push(v.clone()));
        assert_eq!(seen, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn test_into_entries() {
        assert_eq!(into_entries(json!({"b": 2, "a": 1})), vec![json!(2), json!(1)]);
        assert_eq!(into_entries(json!([3])), vec![json!(3)]);
        assert!(into_entries(json!(5)).is_empty());
        assert!(into_entries(Value::Null).is_empty());
    }

    #[test]
    fn test_last_uses_highest_key() {
        let mut collection = Collection::new(vec![json!(1), json!(2)]);
        collection.push(json!(3));
        assert_eq!(last(&collection), Some((2, &json!(3))));
        assert_eq!(last(&Collection::default()), None);
    }

    #[test]
    fn test_simplify_keeps_keys() {
        let collection = Collection::new(vec![json!("a"), json!("b")]);
        assert_eq!(simplify(&collection), json!({"0": "a", "1": "b"}));
    }

    #[test]
    fn test_is_object() {
        assert!(is_object(&json!({})));
        assert!(is_object(&json!([1])));
        assert!(!is_object(&json!("x")));
        assert!(!is_object(&Value::Null));
    }
}
