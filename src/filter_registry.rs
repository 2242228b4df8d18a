//! Filter plugin architecture for event pipelines.
//!
//! This module provides the registration surface that allows filter
//! implementations to be registered by name and built from configuration
//! parameters when a pipeline is assembled.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::event::Event;
use crate::filters::list_to_fields::{ListToFields, ListToFieldsConfig};

/// Error type for filter setup operations
#[derive(Debug, Clone)]
pub enum FilterError {
    NotFound(String),
    InvalidConfig(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::NotFound(name) => write!(f, "Filter not found: {}", name),
            FilterError::InvalidConfig(msg) => write!(f, "Invalid filter config: {}", msg),
        }
    }
}

impl std::error::Error for FilterError {}

/// Trait for event filters
///
/// A filter mutates one event in place. Processing never fails: filters
/// contain their own entry-level faults and report them through the logging
/// sink, so a chain is never aborted by one bad event field.
///
/// Filters hold only immutable configuration, so one instance may process
/// events from multiple worker threads concurrently.
pub trait Filter: Send + Sync {
    /// Get the filter name.
    fn name(&self) -> &str;

    /// Apply the filter to one event, mutating it in place.
    fn process(&self, event: &mut Event);
}

/// Factory closure building a boxed filter from a JSON params document.
pub type FilterFactory =
    Box<dyn Fn(&Value) -> Result<Box<dyn Filter>, FilterError> + Send + Sync>;

/// Registry for storing and building filters by name
pub struct FilterRegistry {
    factories: HashMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// Create a new empty filter registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the built-in filters registered.
    pub fn with_builtin_filters() -> Self {
        let mut registry = Self::new();
        registry.register(
            "list_to_fields",
            Box::new(|params: &Value| {
                let config: ListToFieldsConfig = serde_json::from_value(params.clone())
                    .map_err(|e| FilterError::InvalidConfig(format!("list_to_fields: {}", e)))?;
                Ok(Box::new(ListToFields::new(config)?) as Box<dyn Filter>)
            }),
        );
        registry
    }

    /// Register a filter factory under a name
    ///
    /// # Example
    ///
    /// ```ignore
    /// use unfurl::FilterRegistry;
    ///
    /// let mut registry = FilterRegistry::new();
    /// registry.register("drop_nulls", Box::new(|_params| {
    ///     Ok(Box::new(DropNulls) as Box<dyn Filter>)
    /// }));
    /// ```
    pub fn register(&mut self, name: impl Into<String>, factory: FilterFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Build a filter instance from registered factory and params
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the registered filter
    /// * `params` - Configuration parameters for the instance
    ///
    /// # Returns
    ///
    /// * `Ok(filter)` - Configured filter, ready to process events
    /// * `Err(FilterError)` - Unknown name or rejected configuration
    pub fn build(&self, name: &str, params: &Value) -> Result<Box<dyn Filter>, FilterError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| FilterError::NotFound(name.to_string()))?;

        factory(params)
    }

    /// Check if a filter is registered
    pub fn has_filter(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Get list of all registered filter names
    pub fn list_filters(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
