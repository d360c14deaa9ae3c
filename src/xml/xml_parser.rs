use std::{io::Read, path::Path, sync::Arc};

use log::debug;

use crate::{
    core::{
        builder::{Scan, build_root},
        coerce::DEFAULT_DATE_FORMAT,
        definition::{ClassDefinition, DefinitionRegistry, XmlObject},
        item::ItemObserver,
        list::stream_items,
    },
    error::MappingError,
    xml::{TokenSource, XmlTokenReader},
};

/// Settings shared by every parse made with one parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// `strftime` format of date and time fields.
    pub date_format: String,
    /// Strip surrounding whitespace from text and attribute values before conversion.
    pub trim_text: bool,
    /// Capacity of the buffer wrapped around readers.
    pub capacity: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            trim_text: true,
            capacity: 1024,
        }
    }
}

/// A builder for creating XML parsers bound to a [`DefinitionRegistry`].
///
/// # Examples
///
/// ```
/// use soap_xml_mapper::core::definition::{DefinitionBuilder, DefinitionRegistry, XmlObject};
/// use soap_xml_mapper::xml::XmlParserBuilder;
///
/// #[derive(Debug, Default)]
/// struct Person {
///     id: i32,
///     name: String,
/// }
///
/// impl XmlObject for Person {
///     fn define(def: &mut DefinitionBuilder<Self>) {
///         def.node("//person")
///             .field("@id", |p: &mut Person, v: i32| p.id = v)
///             .field("name", |p: &mut Person, v: String| p.name = v);
///     }
/// }
///
/// let registry = DefinitionRegistry::new();
/// let parser = XmlParserBuilder::new(&registry).build::<Person>().unwrap();
///
/// let person = parser
///     .parse_str(r#"<people><person id="1"><name>Alice</name></person></people>"#)
///     .unwrap();
/// assert_eq!(person.id, 1);
/// assert_eq!(person.name, "Alice");
/// ```
pub struct XmlParserBuilder<'a> {
    registry: &'a DefinitionRegistry,
    options: ParserOptions,
}

impl<'a> XmlParserBuilder<'a> {
    pub fn new(registry: &'a DefinitionRegistry) -> Self {
        Self {
            registry,
            options: ParserOptions::default(),
        }
    }

    /// Sets the `strftime` format used for date and time fields.
    ///
    /// Bindings declared with their own format keep it.
    pub fn date_format<S: AsRef<str>>(mut self, format: S) -> Self {
        self.options.date_format = format.as_ref().to_string();
        self
    }

    /// Whether surrounding whitespace is removed from values. Enabled by default.
    pub fn trim_text(mut self, trim: bool) -> Self {
        self.options.trim_text = trim;
        self
    }

    /// Sets the buffer capacity used when reading from a `Read` source or a file.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.options.capacity = capacity;
        self
    }

    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds a parser producing a single `T`. The definition of `T` is compiled now, so
    /// declaration mistakes surface here rather than while reading a document.
    pub fn build<T: XmlObject>(self) -> Result<XmlParser<'a, T>, MappingError> {
        let definition = self.registry.definition::<T>()?;
        debug!("Built parser for {}", definition.type_name());
        Ok(XmlParser {
            registry: self.registry,
            definition,
            options: self.options,
        })
    }

    /// Builds a parser producing every `T` found in a document.
    pub fn build_list<T: XmlObject>(self) -> Result<XmlListParser<'a, T>, MappingError> {
        let definition = self.registry.definition::<T>()?;
        debug!("Built list parser for {}", definition.type_name());
        Ok(XmlListParser {
            registry: self.registry,
            definition,
            options: self.options,
            observers: Vec::new(),
        })
    }
}

/// Parses the first element matching the node path of `T` into a `T`.
pub struct XmlParser<'a, T> {
    registry: &'a DefinitionRegistry,
    definition: Arc<ClassDefinition<T>>,
    options: ParserOptions,
}

impl<T: XmlObject> XmlParser<'_, T> {
    pub fn definition(&self) -> &ClassDefinition<T> {
        &self.definition
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse<R: Read>(&self, reader: R) -> Result<T, MappingError> {
        let mut tokens = XmlTokenReader::with_capacity(self.options.capacity, reader);
        self.parse_tokens(&mut tokens)
    }

    pub fn parse_str(&self, xml: &str) -> Result<T, MappingError> {
        self.parse(xml.as_bytes())
    }

    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<T, MappingError> {
        let mut tokens = XmlTokenReader::from_path(self.options.capacity, path)?;
        self.parse_tokens(&mut tokens)
    }

    pub fn parse_tokens(&self, tokens: &mut dyn TokenSource) -> Result<T, MappingError> {
        let mut scan = Scan::new(tokens, self.registry, &self.options);
        build_root(&mut scan, &self.definition)
    }
}

/// Parses every element matching the node path of `T`, in document order.
///
/// Malformed or empty items are kept as `None` so that positions line up with the document.
pub struct XmlListParser<'a, T> {
    registry: &'a DefinitionRegistry,
    definition: Arc<ClassDefinition<T>>,
    options: ParserOptions,
    observers: Vec<&'a dyn ItemObserver<T>>,
}

impl<'a, T: XmlObject> XmlListParser<'a, T> {
    pub fn definition(&self) -> &ClassDefinition<T> {
        &self.definition
    }

    /// Adds an observer notified of each item as soon as it is built. Observers run in
    /// registration order.
    pub fn register_item_observer(&mut self, observer: &'a dyn ItemObserver<T>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<Option<T>>, MappingError> {
        let mut tokens = XmlTokenReader::with_capacity(self.options.capacity, reader);
        self.parse_tokens(&mut tokens)
    }

    pub fn parse_str(&self, xml: &str) -> Result<Vec<Option<T>>, MappingError> {
        self.parse(xml.as_bytes())
    }

    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Option<T>>, MappingError> {
        let mut tokens = XmlTokenReader::from_path(self.options.capacity, path)?;
        self.parse_tokens(&mut tokens)
    }

    pub fn parse_tokens(
        &self,
        tokens: &mut dyn TokenSource,
    ) -> Result<Vec<Option<T>>, MappingError> {
        let mut scan = Scan::new(tokens, self.registry, &self.options);
        stream_items(&mut scan, &self.definition, &self.observers)
    }
}
