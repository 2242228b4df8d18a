//! The event record mutated by filter pipelines.
//!
//! An event is an insertion-ordered map from top-level field names to JSON
//! values. Fields are addressed with dotted paths (see [`crate::fieldpath`]);
//! nested objects keep insertion order through serde_json's `preserve_order`
//! feature.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fieldpath::{FieldPath, PathSegment};

/// Error type for event construction
#[derive(Debug, Clone)]
pub enum EventError {
    ParseError(String),
    NotAnObject { actual: &'static str },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            EventError::NotAnObject { actual } => {
                write!(f, "Event body must be a JSON object, got {}", actual)
            }
        }
    }
}

impl std::error::Error for EventError {}

/// A single structured record flowing through a filter pipeline.
///
/// Owned by the host pipeline and mutated in place by filters. Top-level
/// iteration order is insertion order.
///
/// # Example
/// ```
/// use unfurl::Event;
/// use serde_json::json;
///
/// let mut event = Event::new();
/// event.set("payload.env", json!("production"));
/// assert_eq!(event.get("payload.env"), Some(&json!("production")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: IndexMap<String, Value>,
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Build an event from a JSON value.
    ///
    /// # Errors
    /// Returns [`EventError::NotAnObject`] for any non-object value.
    pub fn from_json(value: Value) -> Result<Self, EventError> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            other => Err(EventError::NotAnObject {
                actual: json_type_name(&other),
            }),
        }
    }

    /// Build an event from a JSON text document (one NDJSON line).
    pub fn from_json_str(body: &str) -> Result<Self, EventError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| EventError::ParseError(e.to_string()))?;
        Self::from_json(value)
    }

    /// Convert the event back to a JSON object value.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Resolve a dotted field path.
    ///
    /// Named segments traverse objects, `[n]` segments index arrays. Any
    /// miss or shape mismatch along the way yields `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parsed = FieldPath::from_dotted(path);
        let (first, rest) = parsed.segments.split_first()?;
        let PathSegment::Field(head) = first else {
            return None;
        };
        let mut current = self.fields.get(head)?;
        for segment in rest {
            current = match segment {
                PathSegment::Field(name) => current.as_object()?.get(name)?,
                PathSegment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Set a field, overwriting any existing value at that path.
    ///
    /// Intermediate named segments create objects as needed (non-object
    /// intermediates are replaced). Index segments only descend into
    /// existing array slots. A path without a named head segment is a no-op.
    pub fn set(&mut self, path: &str, value: Value) {
        let parsed = FieldPath::from_dotted(path);
        let Some((PathSegment::Field(head), rest)) = parsed.segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.fields.insert(head.clone(), value);
            return;
        }
        let slot = self.fields.entry(head.clone()).or_insert(Value::Null);
        set_in_value(slot, rest, value);
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let parsed = FieldPath::from_dotted(path);
        let (last, parents) = parsed.segments.split_last()?;

        if parents.is_empty() {
            // Single-segment path: remove from the top-level map, keeping
            // the order of the remaining fields.
            let PathSegment::Field(name) = last else {
                return None;
            };
            return self.fields.shift_remove(name);
        }

        let PathSegment::Field(head) = &parents[0] else {
            return None;
        };
        let mut current = self.fields.get_mut(head)?;
        for segment in &parents[1..] {
            current = match segment {
                PathSegment::Field(name) => current.as_object_mut()?.get_mut(name)?,
                PathSegment::Index(index) => current.as_array_mut()?.get_mut(*index)?,
            };
        }
        match last {
            PathSegment::Field(name) => current.as_object_mut()?.shift_remove(name),
            PathSegment::Index(index) => {
                let array = current.as_array_mut()?;
                if *index < array.len() {
                    Some(array.remove(*index))
                } else {
                    None
                }
            }
        }
    }

    /// Check whether a path resolves to a value.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Iterate top-level fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Get the number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the event has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Walk the remaining segments below a top-level slot, creating objects for
/// named segments and writing the value at the final position.
fn set_in_value(target: &mut Value, segments: &[PathSegment], value: Value) {
    match segments.split_first() {
        None => *target = value,
        Some((PathSegment::Field(name), rest)) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Some(map) = target.as_object_mut() {
                let slot = map.entry(name.clone()).or_insert(Value::Null);
                set_in_value(slot, rest, value);
            }
        }
        Some((PathSegment::Index(index), rest)) => {
            if let Some(slot) = target.as_array_mut().and_then(|array| array.get_mut(*index)) {
                set_in_value(slot, rest, value);
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
