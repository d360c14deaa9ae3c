#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>soap-xml-mapper</h1>
   <h3>Declarative mapping of streamed XML into typed Rust values</h3>

   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # soap-xml-mapper

 Maps XML documents, typically SOAP responses, into plain Rust types. Each type declares
 once where its fields live in a document; the declarations are compiled into a binding
 table and a document is then read in a single forward pass, without building a DOM.

 ## Core Concepts

- **XmlObject:** A `Default` type that declares its field bindings through a `DefinitionBuilder`.
- **Path:** Where a value lives relative to the enclosing element: `"Name"`, `"Address/City"`,
  `"@id"`, `"ShipInfo/@ShippedDate"`, or `"//Order"` for a descendant at any depth.
- **DefinitionRegistry:** Compiles each type's bindings on first use and caches them.
- **XmlParser / XmlListParser:** Read one object, or every matching object, from a document.
- **ItemObserver:** Notified of each item of a list as soon as it is built.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| logger        | Enables a logger `ItemObserver`, useful for debugging purposes |
| request       | Enables SOAP requests over a caller-supplied transport        |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# use soap_xml_mapper::{
#     core::definition::{DefinitionBuilder, DefinitionRegistry, XmlObject},
#     xml::XmlParserBuilder,
#     MappingError,
# };
#[derive(Debug, Default)]
struct Address {
    city: String,
    postal_code: String,
}

impl XmlObject for Address {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.field("City", |a: &mut Address, v: String| a.city = v)
            .field("PostalCode", |a: &mut Address, v: String| a.postal_code = v);
    }
}

#[derive(Debug, Default)]
struct Customer {
    id: String,
    company: String,
    address: Address,
}

impl XmlObject for Customer {
    fn define(def: &mut DefinitionBuilder<Self>) {
        def.node("//Customer")
            .field("@CustomerID", |c: &mut Customer, v: String| c.id = v)
            .field("CompanyName", |c: &mut Customer, v: String| c.company = v)
            .object("FullAddress", |c: &mut Customer, v: Address| c.address = v);
    }
}

fn main() -> Result<(), MappingError> {
    let xml = r#"
        <Root>
          <Customers>
            <Customer CustomerID="GREAL">
              <CompanyName>Great Lakes Food Market</CompanyName>
              <FullAddress>
                <City>Eugene</City>
                <PostalCode>97403</PostalCode>
              </FullAddress>
            </Customer>
          </Customers>
        </Root>"#;

    let registry = DefinitionRegistry::new();
    let parser = XmlParserBuilder::new(&registry).build::<Customer>()?;
    let customer = parser.parse_str(xml)?;

    assert_eq!(customer.id, "GREAL");
    assert_eq!(customer.address.city, "Eugene");

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 ## Contribution
 Unless you explicitly state otherwise, any contribution intentionally submitted
 for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
 dual licensed as above, without any additional terms or conditions

 */

/// Core module: bindings, paths, value conversion and item observers
pub mod core;

/// Error types for definitions and parsing
pub mod error;

#[doc(inline)]
pub use error::*;

/// Streaming XML parsers
pub mod xml;

/// Ready-made item observers
pub mod item;

#[cfg(feature = "request")]
/// SOAP requests mapped through the parsers
pub mod request;
