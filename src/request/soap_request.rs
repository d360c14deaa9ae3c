use std::{
    fmt::Debug,
    sync::{Arc, Mutex, PoisonError},
};

use log::{debug, error};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    core::{definition::DefinitionRegistry, definition::XmlObject, item::ItemObserver},
    error::MappingError,
    request::{ObserverRegistry, SoapObserver, Transport, TransportError},
    xml::{ParserOptions, XmlParserBuilder},
};

#[derive(Error, Debug)]
/// Failure of a SOAP call, as returned to the caller and passed to its observers.
pub enum SoapError<F: Debug> {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("service returned a SOAP fault: {0:?}")]
    Fault(F),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("request task failed: {0}")]
    Task(String),
}

/// Identity of a request, handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    id: Uuid,
    url: String,
    soap_action: String,
}

impl RequestInfo {
    pub fn new<U: Into<String>, A: Into<String>>(url: U, soap_action: A) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            soap_action: soap_action.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn soap_action(&self) -> &str {
        &self.soap_action
    }
}

/// Everything needed to send one envelope and read the fault type of the reply.
pub(crate) struct Exchange {
    pub(crate) info: RequestInfo,
    pub(crate) envelope: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) registry: Arc<DefinitionRegistry>,
    pub(crate) options: ParserOptions,
}

impl Exchange {
    fn parser(&self) -> XmlParserBuilder<'_> {
        XmlParserBuilder::new(&self.registry).options(self.options.clone())
    }

    /// Posts the envelope and returns the body of a successful response.
    fn send<F: XmlObject + Debug>(&self) -> Result<String, SoapError<F>> {
        debug!(
            "Sending request {} to {} ({})",
            self.info.id, self.info.url, self.info.soap_action
        );
        let response = self
            .transport
            .post(&self.info.url, &self.info.soap_action, &self.envelope)
            .inspect_err(|e| {
                error!("Request {} to {} failed: {}", self.info.id, self.info.url, e);
            })?;

        if response.is_success() {
            return Ok(response.body);
        }
        match response.status {
            500 => {
                debug!("Request {} returned a fault", self.info.id);
                let fault = self.parser().build::<F>()?.parse_str(&response.body)?;
                Err(SoapError::Fault(fault))
            }
            status => {
                error!(
                    "Request {} to {} returned HTTP status {}",
                    self.info.id, self.info.url, status
                );
                Err(SoapError::Status(status))
            }
        }
    }
}

fn notify<T, F: Debug>(
    observers: &Mutex<ObserverRegistry<T, F>>,
    info: &RequestInfo,
    result: &Result<T, SoapError<F>>,
) {
    let observers = observers.lock().unwrap_or_else(PoisonError::into_inner);
    match result {
        Ok(value) => observers.notify_complete(info, value),
        Err(error) => observers.notify_exception(info, error),
    }
}

async fn join<R, F: Debug>(handle: JoinHandle<Result<R, SoapError<F>>>) -> Result<R, SoapError<F>> {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            error!("Request task failed: {}", e);
            Err(SoapError::Task(e.to_string()))
        }
    }
}

struct RequestInner<T, F: Debug> {
    exchange: Exchange,
    observers: Mutex<ObserverRegistry<T, F>>,
}

impl<T: XmlObject, F: XmlObject + Debug> RequestInner<T, F> {
    fn perform(&self) -> Result<T, SoapError<F>> {
        let body = self.exchange.send::<F>()?;
        Ok(self.exchange.parser().build::<T>()?.parse_str(&body)?)
    }

    fn run(&self) -> Result<T, SoapError<F>> {
        let result = self.perform();
        notify(&self.observers, &self.exchange.info, &result);
        result
    }
}

/// A SOAP call whose response body maps to a single `T`, with `F` as its fault type.
///
/// Cloning is cheap and shares observers.
pub struct Request<T, F: Debug> {
    inner: Arc<RequestInner<T, F>>,
}

impl<T, F: Debug> Clone for Request<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F> Request<T, F>
where
    T: XmlObject + Send,
    F: XmlObject + Debug + Send,
{
    pub(crate) fn new(exchange: Exchange) -> Self {
        Self {
            inner: Arc::new(RequestInner {
                exchange,
                observers: Mutex::new(ObserverRegistry::new()),
            }),
        }
    }

    pub fn info(&self) -> &RequestInfo {
        &self.inner.exchange.info
    }

    pub fn id(&self) -> Uuid {
        self.inner.exchange.info.id()
    }

    pub fn url(&self) -> &str {
        self.inner.exchange.info.url()
    }

    pub fn soap_action(&self) -> &str {
        self.inner.exchange.info.soap_action()
    }

    pub fn register_observer(&self, observer: Arc<dyn SoapObserver<T, F>>) {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .register_observer(observer);
    }

    pub fn deregister_observer(&self, observer: &Arc<dyn SoapObserver<T, F>>) -> bool {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .deregister_observer(observer)
    }

    /// Sends the request on the current thread and notifies the observers.
    pub fn execute_blocking(&self) -> Result<T, SoapError<F>> {
        self.inner.run()
    }

    /// Sends the request on tokio's blocking pool. Observers are notified from that
    /// thread before the handle resolves.
    pub fn execute(&self) -> JoinHandle<Result<T, SoapError<F>>> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.run())
    }

    /// Like [`Request::execute`], with a failed task reported as [`SoapError::Task`].
    pub async fn execute_async(&self) -> Result<T, SoapError<F>> {
        join(self.execute()).await
    }
}

struct ListRequestInner<T, F: Debug> {
    exchange: Exchange,
    observers: Mutex<ObserverRegistry<Vec<Option<T>>, F>>,
    item_observers: Mutex<Vec<Arc<dyn ItemObserver<T> + Send + Sync>>>,
}

impl<T: XmlObject, F: XmlObject + Debug> ListRequestInner<T, F> {
    fn perform(&self) -> Result<Vec<Option<T>>, SoapError<F>> {
        let body = self.exchange.send::<F>()?;
        let item_observers = self
            .item_observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut parser = self.exchange.parser().build_list::<T>()?;
        for observer in &item_observers {
            parser.register_item_observer(observer.as_ref());
        }
        Ok(parser.parse_str(&body)?)
    }

    fn run(&self) -> Result<Vec<Option<T>>, SoapError<F>> {
        let result = self.perform();
        notify(&self.observers, &self.exchange.info, &result);
        result
    }
}

/// A SOAP call whose response body maps to every `T` it contains.
///
/// Items that fail to map are kept as `None`; see
/// [`XmlListParser`](crate::xml::XmlListParser).
pub struct ListRequest<T, F: Debug> {
    inner: Arc<ListRequestInner<T, F>>,
}

impl<T, F: Debug> Clone for ListRequest<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F> ListRequest<T, F>
where
    T: XmlObject + Send,
    F: XmlObject + Debug + Send,
{
    pub(crate) fn new(exchange: Exchange) -> Self {
        Self {
            inner: Arc::new(ListRequestInner {
                exchange,
                observers: Mutex::new(ObserverRegistry::new()),
                item_observers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn info(&self) -> &RequestInfo {
        &self.inner.exchange.info
    }

    pub fn id(&self) -> Uuid {
        self.inner.exchange.info.id()
    }

    pub fn url(&self) -> &str {
        self.inner.exchange.info.url()
    }

    pub fn soap_action(&self) -> &str {
        self.inner.exchange.info.soap_action()
    }

    pub fn register_observer(&self, observer: Arc<dyn SoapObserver<Vec<Option<T>>, F>>) {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .register_observer(observer);
    }

    pub fn deregister_observer(&self, observer: &Arc<dyn SoapObserver<Vec<Option<T>>, F>>) -> bool {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .deregister_observer(observer)
    }

    /// Adds an observer called for each item while the response is parsed.
    pub fn register_item_observer(&self, observer: Arc<dyn ItemObserver<T> + Send + Sync>) {
        self.inner
            .item_observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    pub fn execute_blocking(&self) -> Result<Vec<Option<T>>, SoapError<F>> {
        self.inner.run()
    }

    pub fn execute(&self) -> JoinHandle<Result<Vec<Option<T>>, SoapError<F>>> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.run())
    }

    pub async fn execute_async(&self) -> Result<Vec<Option<T>>, SoapError<F>> {
        join(self.execute()).await
    }
}
