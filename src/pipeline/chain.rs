//! Ordered filter chain applied to events.
//!
//! A chain holds configured filter stages and runs each of them, in order,
//! on every event handed to it.

use tracing::debug;

use crate::event::Event;
use crate::filter_registry::{Filter, FilterError, FilterRegistry};
use crate::pipeline::config_loader::PipelineConfig;

/// Ordered sequence of filter stages.
///
/// # Example Flow
/// 1. Load pipeline config (defines stages and their params)
/// 2. Build the chain against a registry of filter factories
/// 3. Apply the chain to each incoming event
pub struct FilterChain {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a filter stage to the end of the chain.
    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.stages.push(filter);
    }

    /// Build a chain from pipeline configuration.
    ///
    /// Stages are built in configuration order; the first stage that fails
    /// to build aborts assembly.
    ///
    /// # Arguments
    /// * `config` - Pipeline configuration listing the stages
    /// * `registry` - Registry resolving filter names to factories
    ///
    /// # Errors
    /// Returns error for an unknown filter name or rejected stage params.
    pub fn from_config(
        config: &PipelineConfig,
        registry: &FilterRegistry,
    ) -> Result<Self, FilterError> {
        let mut chain = Self::new();
        for stage in &config.filters {
            chain.push(registry.build(&stage.filter, &stage.params)?);
        }
        Ok(chain)
    }

    /// Apply every stage, in order, to one event.
    ///
    /// Stages never fail; the event comes back mutated in place.
    pub fn apply(&self, event: &mut Event) {
        for stage in &self.stages {
            debug!("Applying filter stage '{}'", stage.name());
            stage.process(event);
        }
    }

    /// Get the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Get the stage names in application order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}
