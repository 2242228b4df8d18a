//! Built-in filter implementations.

pub mod list_to_fields;

pub use list_to_fields::{ListToFields, ListToFieldsConfig};
