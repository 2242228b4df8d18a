//! # Unfurl: Event Field Expansion Pipeline
//!
//! Unfurl provides an event filter pipeline whose core filter expands a
//! packed list or map field on an event into top-level fields.
//!
//! ## Features
//!
//! - **Path-addressable events**: insertion-ordered records addressed with dotted field paths
//! - **Filter registry system**: plugin architecture for registering filters built from config params
//! - **list_to_fields filter**: by-name or positional extraction of key/value entries, with optional prefix
//! - **YAML pipelines**: ordered filter chains assembled from a pipeline YAML file
//! - **NDJSON runner**: CLI that applies a configured chain to an event stream
//!
//! ## Example: pipeline definition
//!
//! ```yaml
//! pipeline:
//!   filters:
//!     - filter: list_to_fields
//!       params:
//!         source: labels
//!         key: key
//!         value: value
//!         prefix: "label_"
//! ```
//!
//! ## Example: expanding a field in code
//!
//! ```
//! use unfurl::{Event, Filter, ListToFields, ListToFieldsConfig};
//! use serde_json::json;
//!
//! let filter = ListToFields::new(ListToFieldsConfig {
//!     source: "labels".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut event = Event::from_json(json!({
//!     "labels": [{"env": "staging"}, {"team": "ingest"}]
//! }))
//! .unwrap();
//!
//! filter.process(&mut event);
//! assert_eq!(event.get("env"), Some(&json!("staging")));
//! assert_eq!(event.get("team"), Some(&json!("ingest")));
//! ```

// Core modules
pub mod event;
pub mod fieldpath;
pub mod filter_registry;
pub mod filters;

// Pipeline assembly and run surfaces
pub mod envelope;
pub mod output;
pub mod pipeline;

// Re-export key types
pub use envelope::EventEnvelope;
pub use event::{Event, EventError};
pub use fieldpath::{FieldPath, PathSegment};
pub use filter_registry::{Filter, FilterError, FilterFactory, FilterRegistry};
pub use filters::list_to_fields::{ListToFields, ListToFieldsConfig};
pub use output::{EventWriter, OutputFormat, WriteError};
pub use pipeline::{FilterChain, FilterStage, PipelineConfig};
