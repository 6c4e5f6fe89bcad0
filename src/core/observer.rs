use std::sync::atomic::{AtomicUsize, Ordering};
use reqwest::Method;
use crate::api::ApiError;

/// Hook the client calls around every round trip.
///
/// Purely diagnostic: implementations must not panic and cannot influence the
/// outcome of the call they observe.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, method: &Method, url: &str);
    fn on_response(&self, method: &Method, url: &str, status: u16);
    fn on_failure(&self, method: &Method, url: &str, error: &ApiError);
}

/// Default observer, emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &str) {
        tracing::debug!(%method, url, "backend request");
    }

    fn on_response(&self, method: &Method, url: &str, status: u16) {
        tracing::debug!(%method, url, status, "backend response");
    }

    fn on_failure(&self, method: &Method, url: &str, error: &ApiError) {
        tracing::warn!(%method, url, error = %error, "backend call failed");
    }
}

/// Counts calls; handy for asserting one round trip per operation.
#[derive(Debug, Default)]
pub struct CountingObserver {
    requests: AtomicUsize,
    responses: AtomicUsize,
    failures: AtomicUsize,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn responses(&self) -> usize {
        self.responses.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

impl RequestObserver for CountingObserver {
    fn on_request(&self, _method: &Method, _url: &str) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn on_response(&self, _method: &Method, _url: &str, _status: u16) {
        self.responses.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self, _method: &Method, _url: &str, _error: &ApiError) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_counting_observer() {
        let observer = CountingObserver::new();
        observer.on_request(&Method::GET, "http://localhost/api/products");
        observer.on_response(&Method::GET, "http://localhost/api/products", 500);
        observer.on_failure(
            &Method::GET,
            "http://localhost/api/products",
            &ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, None),
        );

        assert_eq!(observer.requests(), 1);
        assert_eq!(observer.responses(), 1);
        assert_eq!(observer.failures(), 1);
    }
}
