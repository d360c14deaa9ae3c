use std::{fmt::Debug, sync::Arc};

use log::debug;

use crate::{
    core::definition::{DefinitionRegistry, XmlObject},
    error::MappingError,
    request::{ListRequest, Request, Transport, soap_request::Exchange, soap_request::RequestInfo},
    xml::ParserOptions,
};

/// Creates requests sharing one transport, one definition registry and one set of parser
/// options.
pub struct RequestFactory {
    transport: Arc<dyn Transport>,
    registry: Arc<DefinitionRegistry>,
    options: ParserOptions,
}

impl RequestFactory {
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<DefinitionRegistry>) -> Self {
        Self {
            transport,
            registry,
            options: ParserOptions::default(),
        }
    }

    /// Sets the date format used when mapping responses.
    pub fn date_format<S: AsRef<str>>(mut self, format: S) -> Self {
        self.options.date_format = format.as_ref().to_string();
        self
    }

    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<DefinitionRegistry> {
        &self.registry
    }

    fn exchange<T: XmlObject, F: XmlObject>(
        &self,
        url: &str,
        envelope: &str,
        soap_action: &str,
    ) -> Result<Exchange, MappingError> {
        // Both the result and the fault type must map before anything is sent.
        self.registry.definition::<T>()?;
        self.registry.definition::<F>()?;
        let info = RequestInfo::new(url, soap_action);
        debug!("Created request {} for {}", info.id(), url);
        Ok(Exchange {
            info,
            envelope: envelope.to_string(),
            transport: Arc::clone(&self.transport),
            registry: Arc::clone(&self.registry),
            options: self.options.clone(),
        })
    }

    /// Builds a request whose response maps to a single `T`, and whose SOAP faults map to `F`.
    pub fn build_request<T, F>(
        &self,
        url: &str,
        envelope: &str,
        soap_action: &str,
    ) -> Result<Request<T, F>, MappingError>
    where
        T: XmlObject + Send,
        F: XmlObject + Debug + Send,
    {
        Ok(Request::new(self.exchange::<T, F>(url, envelope, soap_action)?))
    }

    /// Builds a request whose response maps to every `T` it contains.
    pub fn build_list_request<T, F>(
        &self,
        url: &str,
        envelope: &str,
        soap_action: &str,
    ) -> Result<ListRequest<T, F>, MappingError>
    where
        T: XmlObject + Send,
        F: XmlObject + Debug + Send,
    {
        Ok(ListRequest::new(self.exchange::<T, F>(url, envelope, soap_action)?))
    }
}
