//! Sending SOAP envelopes and mapping the responses.
//!
//! A [`RequestFactory`] binds a caller-supplied [`Transport`] to a shared
//! [`DefinitionRegistry`](crate::core::definition::DefinitionRegistry). Requests run on
//! tokio's blocking pool and report their outcome to registered [`SoapObserver`]s.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use soap_xml_mapper::core::definition::{DefinitionBuilder, DefinitionRegistry, XmlObject};
//! use soap_xml_mapper::request::{RequestFactory, Transport, TransportError, TransportResponse};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     fn post(&self, _url: &str, _action: &str, _envelope: &str) -> Result<TransportResponse, TransportError> {
//!         Ok(TransportResponse::new(200, "<Envelope><Body><Price>12.5</Price></Body></Envelope>"))
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Quote {
//!     price: f64,
//! }
//!
//! impl XmlObject for Quote {
//!     fn define(def: &mut DefinitionBuilder<Self>) {
//!         def.node("//Body").field("Price", |q: &mut Quote, v: f64| q.price = v);
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Fault {
//!     reason: String,
//! }
//!
//! impl XmlObject for Fault {
//!     fn define(def: &mut DefinitionBuilder<Self>) {
//!         def.node("//Fault").field("faultstring", |f: &mut Fault, v: String| f.reason = v);
//!     }
//! }
//!
//! let factory = RequestFactory::new(Arc::new(Canned), Arc::new(DefinitionRegistry::new()));
//! let request = factory
//!     .build_request::<Quote, Fault>("http://localhost/quotes", "<Envelope/>", "urn:GetQuote")
//!     .unwrap();
//!
//! let quote = request.execute_blocking().unwrap();
//! assert_eq!(quote.price, 12.5);
//! ```

mod factory;
mod observer;
mod soap_request;
mod transport;

pub use factory::RequestFactory;
pub use observer::{ObserverRegistry, SoapObserver};
pub use soap_request::{ListRequest, Request, RequestInfo, SoapError};
pub use transport::{Transport, TransportError, TransportResponse};
