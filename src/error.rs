use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
/// Error in the declared field-to-path metadata of a type.
///
/// These are detected when a type's definition is compiled, before any document is read,
/// and always point at a mistake in the calling code.
pub enum DefinitionError {
    #[error("type {type_name} declares no field bindings")]
    NoBindings { type_name: &'static str },

    #[error("field {path:?} of {type_name} maps to {child_type}, which declares no field bindings")]
    EmptyChild {
        type_name: &'static str,
        path: String,
        child_type: &'static str,
    },

    #[error("conflicting bindings on path {path:?} of {type_name}: {first} and {second}")]
    Conflict {
        type_name: &'static str,
        path: String,
        first: String,
        second: String,
    },

    #[error("invalid path {path:?} in {type_name}: {reason}")]
    InvalidPath {
        type_name: &'static str,
        path: String,
        reason: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert {value:?} into {target}: {reason}")]
/// Raw text that could not be converted into the declared field type.
pub struct ValueFormatError {
    pub value: String,
    pub target: &'static str,
    pub reason: String,
}

#[derive(Error, Debug)]
/// Error raised while scanning a document.
pub enum ParsingError {
    #[error("invalid value at {path}: {source}")]
    ValueFormat {
        path: String,
        #[source]
        source: ValueFormatError,
    },

    #[error("document ended before <{element}> was closed")]
    Truncated { element: String },

    #[error("no element matching {path} found in document")]
    RootNotFound { path: String },

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("malformed escape sequence: {0}")]
    Escape(#[from] EscapeError),

    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("item observer failed: {0:#}")]
    Observer(anyhow::Error),
}

#[derive(Error, Debug)]
/// Mapping error, either in a type's declarations or in the parsed input.
pub enum MappingError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl MappingError {
    /// Returns true when the error comes from a malformed value that a list may absorb
    /// as a gap slot.
    pub(crate) fn is_value_format(&self) -> bool {
        matches!(
            self,
            MappingError::Parsing(ParsingError::ValueFormat { .. })
        )
    }
}
