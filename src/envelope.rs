/// Event envelope for pipeline runs
///
/// Wraps an event with metadata for tracking it through a run
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID for tracking
    pub event_id: Uuid,

    /// Timestamp when the event entered the pipeline
    pub received_at: DateTime<Utc>,

    /// Source tag (input file, stream name, ...)
    pub source: Option<String>,

    /// The event itself
    pub event: Event,
}

impl EventEnvelope {
    /// Create a new envelope around an event
    pub fn new(event: Event, source: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            received_at: Utc::now(),
            source,
            event,
        }
    }
}
