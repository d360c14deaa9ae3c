use std::{fmt::Debug, sync::Arc};

use crate::request::{RequestInfo, SoapError};

/// Notified once per executed request with either its result or its failure.
pub trait SoapObserver<T, F: Debug>: Send + Sync {
    fn on_completion(&self, request: &RequestInfo, result: &T);

    fn on_exception(&self, request: &RequestInfo, error: &SoapError<F>);
}

/// Ordered set of observers attached to one request.
///
/// The registry does no locking of its own; requests keep it behind a `Mutex`.
pub struct ObserverRegistry<T, F: Debug> {
    observers: Vec<Arc<dyn SoapObserver<T, F>>>,
}

impl<T, F: Debug> Default for ObserverRegistry<T, F> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<T, F: Debug> ObserverRegistry<T, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_observer(&mut self, observer: Arc<dyn SoapObserver<T, F>>) {
        self.observers.push(observer);
    }

    /// Removes the first registration of `observer`. Returns whether one was found.
    pub fn deregister_observer(&mut self, observer: &Arc<dyn SoapObserver<T, F>>) -> bool {
        match self
            .observers
            .iter()
            .position(|registered| Arc::ptr_eq(registered, observer))
        {
            Some(idx) => {
                self.observers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn notify_exception(&self, request: &RequestInfo, error: &SoapError<F>) {
        for observer in &self.observers {
            observer.on_exception(request, error);
        }
    }

    pub fn notify_complete(&self, request: &RequestInfo, result: &T) {
        for observer in &self.observers {
            observer.on_completion(request, result);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
