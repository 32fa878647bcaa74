//! Field projection over collection elements.

use super::Collection;
use crate::core;
use serde_json::{Map, Value};

type FieldPredicate<'a> = Box<dyn Fn(&Value, &str, &Collection) -> bool + 'a>;
type ValueMapper<'a> = Box<dyn Fn(&Value, &str, Option<&Value>) -> Option<Value> + 'a>;

/// Builder for [`Collection::filter`].
///
/// Every element at keys `0..count()` is turned into an object holding only
/// the requested fields, in the requested order.
///
/// ```
/// use rustmemocollect::Collection;
/// use serde_json::json;
///
/// let items = Collection::new(vec![json!({"id": 5, "extra": "x"})]);
/// let projected = items
///     .filter(&["id"])
///     .map_value(|_, _, raw| raw.and_then(|v| v.as_i64()).map(|n| json!(n * 2)))
///     .to_vec();
///
/// assert_eq!(projected, vec![json!({"id": 10})]);
/// ```
pub struct Projection<'a> {
    source: &'a Collection,
    fields: Vec<String>,
    callback: Option<FieldPredicate<'a>>,
    value_callback: Option<ValueMapper<'a>>,
}

impl<'a> Projection<'a> {
    pub(crate) fn new<S: AsRef<str>>(source: &'a Collection, fields: &[S]) -> Self {
        Self {
            source,
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            callback: None,
            value_callback: None,
        }
    }

    /// Keeps a field only when `callback(element, field, collection)`
    /// returns true. Without it every requested field is kept.
    pub fn when<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value, &str, &Collection) -> bool + 'a,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Computes field values through `value_callback(element, field, raw)`.
    /// Returning `None` or null keeps the raw value.
    pub fn map_value<F>(mut self, value_callback: F) -> Self
    where
        F: Fn(&Value, &str, Option<&Value>) -> Option<Value> + 'a,
    {
        self.value_callback = Some(Box::new(value_callback));
        self
    }

    fn project(&self, element: &Value) -> Value {
        let mut record = Map::new();

        for field in &self.fields {
            let keep = self
                .callback
                .as_ref()
                .is_none_or(|callback| callback(element, field.as_str(), self.source));
            if !keep {
                continue;
            }

            let raw = core::field(element, field);
            let value = self
                .value_callback
                .as_ref()
                .and_then(|value_callback| value_callback(element, field.as_str(), raw))
                .filter(|computed| !computed.is_null())
                .or_else(|| raw.cloned())
                .unwrap_or(Value::Null);

            record.insert(field.clone(), value);
        }

        Value::Object(record)
    }

    /// Projected records as a plain vector.
    pub fn to_vec(&self) -> Vec<Value> {
        (0..self.source.count())
            .map(|idx| self.project(self.source.get(idx).unwrap_or(&Value::Null)))
            .collect()
    }

    /// Projected records wrapped in a new collection.
    pub fn into_collection(self) -> Collection {
        Collection::new(self.to_vec())
    }
}
