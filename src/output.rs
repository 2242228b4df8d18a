//! Output writers for processed events.
//!
//! Events leaving a pipeline run are written either as NDJSON (one object
//! per line) or as a single JSON array.

use std::io::Write;

use crate::event::Event;

/// Error type for output operations
#[derive(Debug)]
pub enum WriteError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for WriteError {
    fn from(err: serde_json::Error) -> Self {
        WriteError::JsonError(err)
    }
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError::IoError(err)
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::JsonError(e) => write!(f, "JSON error: {}", e),
            WriteError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for WriteError {}

/// Output shape for processed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    Ndjson,
    /// A single JSON array of objects
    JsonArray,
}

/// Writer emitting processed events in the selected format.
pub struct EventWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    first: bool,
}

impl<W: Write> EventWriter<W> {
    /// Create a new event writer; the JSON array format writes its opening
    /// bracket immediately.
    pub fn new(mut writer: W, format: OutputFormat) -> Result<Self, WriteError> {
        if format == OutputFormat::JsonArray {
            write!(writer, "[")?;
        }
        Ok(Self {
            writer,
            format,
            first: true,
        })
    }

    /// Write a single processed event
    pub fn write_event(&mut self, event: &Event) -> Result<(), WriteError> {
        let json = serde_json::to_string(event)?;
        match self.format {
            OutputFormat::Ndjson => {
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::JsonArray => {
                if !self.first {
                    write!(self.writer, ",")?;
                }
                write!(self.writer, "{}", json)?;
            }
        }
        self.first = false;
        Ok(())
    }

    /// Finish the stream (closes the array in JSON array format) and flush
    pub fn finish(mut self) -> Result<(), WriteError> {
        if self.format == OutputFormat::JsonArray {
            write!(self.writer, "]")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
