//! Filter that expands a packed list or map field into top-level fields.
//!
//! The source field may hold a list of key/value entry objects (addressed
//! either by configured sub-field names or by position) or a map whose pairs
//! are lifted onto the event root. Malformed entries are logged and skipped;
//! one bad entry never aborts the rest of the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::event::Event;
use crate::filter_registry::{Filter, FilterError};

/// Configuration for [`ListToFields`].
///
/// Only `source` is required. Supplying `key` without `value` (or the other
/// way around) is not an error: the filter silently falls back to positional
/// extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToFieldsConfig {
    /// Field path holding the list or map to expand
    pub source: String,

    /// Field name inside each list entry holding the output key
    #[serde(default)]
    pub key: String,

    /// Field name inside each list entry holding the output value
    #[serde(default)]
    pub value: String,

    /// Prefix prepended to every generated field name
    #[serde(default)]
    pub prefix: String,

    /// Whether to delete the source field after processing
    #[serde(default = "default_remove_source")]
    pub remove_source: bool,
}

fn default_remove_source() -> bool {
    true
}

impl Default for ListToFieldsConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            key: String::new(),
            value: String::new(),
            prefix: String::new(),
            remove_source: true,
        }
    }
}

/// Why a list entry produced no field.
enum EntrySkip {
    /// The entry is not an object
    Unsupported,
    /// The configured key or value sub-field resolved to nothing
    MissingKey,
}

/// Filter that expands a packed list or map field into top-level fields.
///
/// # Example
/// ```
/// use unfurl::{Event, Filter, ListToFields, ListToFieldsConfig};
/// use serde_json::json;
///
/// let filter = ListToFields::new(ListToFieldsConfig {
///     source: "labels".to_string(),
///     key: "key".to_string(),
///     value: "value".to_string(),
///     ..Default::default()
/// })
/// .unwrap();
///
/// let mut event = Event::from_json(json!({
///     "labels": [{"key": "env", "value": "staging"}]
/// }))
/// .unwrap();
///
/// filter.process(&mut event);
/// assert_eq!(event.get("env"), Some(&json!("staging")));
/// assert_eq!(event.get("labels"), None);
/// ```
pub struct ListToFields {
    config: ListToFieldsConfig,
    /// Fixed at construction: true when both key and value names are set
    access_by_name: bool,
}

impl ListToFields {
    /// Create the filter from its configuration.
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidConfig`] when `source` is empty. This
    /// is the only setup-time check; everything else is handled per event.
    pub fn new(config: ListToFieldsConfig) -> Result<Self, FilterError> {
        if config.source.is_empty() {
            return Err(FilterError::InvalidConfig(
                "list_to_fields requires a non-empty 'source'".to_string(),
            ));
        }

        let access_by_name = !config.key.is_empty() && !config.value.is_empty();

        Ok(Self {
            config,
            access_by_name,
        })
    }

    /// Extract one (field name, value) pair from a list entry.
    ///
    /// Entries are expected to be objects. In name mode the configured key
    /// and value sub-fields are looked up; in positional mode the first pair
    /// in insertion order is taken (an empty object yields no pair).
    fn extract_pair(&self, entry: &Value) -> Result<(String, Value), EntrySkip> {
        let map = entry.as_object().ok_or(EntrySkip::Unsupported)?;

        let (key, value) = if self.access_by_name {
            let key = map.get(&self.config.key).ok_or(EntrySkip::MissingKey)?;
            let value = map.get(&self.config.value).ok_or(EntrySkip::MissingKey)?;
            (stringify_key(key), value.clone())
        } else {
            let (key, value) = map.iter().next().ok_or(EntrySkip::MissingKey)?;
            (key.clone(), value.clone())
        };

        Ok((format!("{}{}", self.config.prefix, key), value))
    }
}

impl Filter for ListToFields {
    fn name(&self) -> &str {
        "list_to_fields"
    }

    fn process(&self, event: &mut Event) {
        // Absent source: nothing to do, not even removal.
        let Some(input) = event.get(&self.config.source).cloned() else {
            return;
        };

        match &input {
            Value::Array(entries) => {
                for entry in entries {
                    match self.extract_pair(entry) {
                        Ok((name, value)) => event.set(&name, value),
                        Err(EntrySkip::Unsupported) => {
                            warn!("Data structure not supported. {}", entry);
                        }
                        Err(EntrySkip::MissingKey) => {
                            warn!(
                                "Could not find key {} in incoming data, please check your config.",
                                self.config.key
                            );
                        }
                    }
                }
            }
            Value::Object(map) => {
                // Map input lifts every pair onto the event root as-is; the
                // prefix applies to list extraction only.
                for (key, value) in map {
                    event.set(key, value.clone());
                }
            }
            // Scalar input: no fields to add, but removal below still applies.
            _ => {}
        }

        if self.config.remove_source {
            event.remove(&self.config.source);
        }
    }
}

/// Render a resolved key value as a field name. String keys are used
/// verbatim; anything else renders via its JSON text.
fn stringify_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
