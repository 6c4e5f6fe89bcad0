use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{extract_server_detail, ApiError};
use crate::core::config::ClientConfig;
use crate::core::observer::{RequestObserver, TracingObserver};

/// Thin async client for the inventory backend.
///
/// Holds only immutable configuration. Every operation is exactly one HTTP
/// round trip with no retries and no caching, so clones and concurrent calls
/// never affect each other.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_root: Url,
    observer: Arc<dyn RequestObserver>,
}

/// Whether a failed response body is mined for a server explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorDetail {
    StatusOnly,
    FromBody,
}

pub(crate) struct Reply {
    pub(crate) url: String,
    pub(crate) method: Method,
    pub(crate) body: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: &ClientConfig, observer: Arc<dyn RequestObserver>) -> Result<Self, ApiError> {
        let api_root = config.api_root()?;
        let api_root = Url::parse(&api_root).map_err(|_| ApiError::InvalidConfig(config.base_url.clone()))?;

        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = settle_client(builder.build(), config.timeout)?;

        Ok(Self { client, api_root, observer })
    }

    /// Resolved `<base>/api` prefix.
    pub fn api_root(&self) -> &str {
        self.api_root.as_str()
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// GET and decode. Failures carry status and reason only.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.request(Method::GET, segments);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let reply = self.round_trip(builder, ErrorDetail::StatusOnly).await?;
        self.decode(reply)
    }

    /// POST/PUT a JSON body and decode the returned entity.
    pub(crate) async fn send_json<T, B>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, segments).json(body);
        let reply = self.round_trip(builder, ErrorDetail::FromBody).await?;
        self.decode(reply)
    }

    /// POST/PUT without a JSON body (path or query string carries the intent).
    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.request(method, segments);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let reply = self.round_trip(builder, ErrorDetail::FromBody).await?;
        self.decode(reply)
    }

    /// DELETE; any success body is discarded.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, segments);
        self.round_trip(builder, ErrorDetail::FromBody).await?;
        Ok(())
    }

    pub(crate) async fn round_trip(&self, builder: RequestBuilder, detail: ErrorDetail) -> Result<Reply, ApiError> {
        // 1. Build (serialization of the body happens here)
        let request = builder.build().map_err(|source| ApiError::Network {
            url: source.url().map(|u| u.to_string()).unwrap_or_default(),
            source,
        })?;
        let method = request.method().clone();
        let url = request.url().to_string();

        // 2. Send
        self.observer.on_request(&method, &url);
        let resp = match self.client.execute(request).await {
            Ok(resp) => resp,
            Err(source) => {
                let err = ApiError::Network { url: url.clone(), source };
                return Err(self.fail(&method, &url, err));
            }
        };

        let status = resp.status();
        self.observer.on_response(&method, &url, status.as_u16());

        // 3. Read the body once; both branches below need it
        let body = match resp.text().await {
            Ok(body) => body,
            Err(source) => {
                let err = ApiError::Network { url: url.clone(), source };
                return Err(self.fail(&method, &url, err));
            }
        };

        if !status.is_success() {
            let server_detail = match detail {
                ErrorDetail::FromBody => extract_server_detail(&body),
                ErrorDetail::StatusOnly => None,
            };
            return Err(self.fail(&method, &url, ApiError::status(status, server_detail)));
        }

        Ok(Reply { url, method, body })
    }

    pub(crate) fn decode<T: DeserializeOwned>(&self, reply: Reply) -> Result<T, ApiError> {
        serde_json::from_str(&reply.body).map_err(|source| {
            let err = ApiError::decode(&reply.url, &reply.body, source);
            self.fail(&reply.method, &reply.url, err)
        })
    }

    fn fail(&self, method: &Method, url: &str, err: ApiError) -> ApiError {
        self.observer.on_failure(method, url, &err);
        err
    }
}

// A plain client is an acceptable stand-in unless it would drop a requested timeout.
fn settle_client<E: Display>(built: Result<Client, E>, timeout: Option<Duration>) -> Result<Client, ApiError> {
    match (built, timeout) {
        (Ok(client), _) => Ok(client),
        (Err(e), Some(timeout)) => Err(ApiError::InvalidConfig(format!(
            "HTTP client with a {:?} timeout could not be built: {}",
            timeout, e
        ))),
        (Err(_), None) => Ok(Client::new()),
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_root", &self.api_root.as_str())
            .finish_non_exhaustive()
    }
}
