/// Compiled field-to-path mappings and the registry caching them.
pub mod definition;

/// Conversion of raw XML text into field values.
pub mod coerce;

/// Declared tag paths and how they match the element stack.
pub mod path;

/// Callbacks notified while a list is parsed.
pub mod item;

pub(crate) mod builder;

pub(crate) mod list;
