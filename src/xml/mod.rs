//! XML reading for mapped types.
//!
//! The parsers in this module read a document in one forward pass over a [`TokenSource`],
//! built on `quick-xml` for real input, and fill the fields of an [`XmlObject`] as their
//! paths are reached.
//!
//! # Examples
//!
//! ## Reading a list
//!
//! ```
//! use soap_xml_mapper::core::definition::{DefinitionBuilder, DefinitionRegistry, XmlObject};
//! use soap_xml_mapper::xml::XmlParserBuilder;
//!
//! #[derive(Debug, Default)]
//! struct Product {
//!     id: String,
//!     price: f64,
//! }
//!
//! impl XmlObject for Product {
//!     fn define(def: &mut DefinitionBuilder<Self>) {
//!         def.node("//product")
//!             .field("@id", |p: &mut Product, v: String| p.id = v)
//!             .field("price", |p: &mut Product, v: f64| p.price = v);
//!     }
//! }
//!
//! let xml = r#"
//! <catalog>
//!   <product id="P001"><price>19.99</price></product>
//!   <product id="P002"><price>not a number</price></product>
//!   <product id="P003"><price>5</price></product>
//! </catalog>"#;
//!
//! let registry = DefinitionRegistry::new();
//! let parser = XmlParserBuilder::new(&registry).build_list::<Product>().unwrap();
//! let products = parser.parse_str(xml).unwrap();
//!
//! assert_eq!(products.len(), 3);
//! assert_eq!(products[0].as_ref().unwrap().id, "P001");
//! // The malformed product is kept as a gap.
//! assert!(products[1].is_none());
//! assert_eq!(products[2].as_ref().unwrap().price, 5.0);
//! ```
//!
//! [`XmlObject`]: crate::core::definition::XmlObject

mod token;
mod xml_parser;

pub use token::{StartElement, TokenSource, XmlToken, XmlTokenReader};
pub use xml_parser::{ParserOptions, XmlListParser, XmlParser, XmlParserBuilder};
