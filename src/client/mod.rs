//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::domain::{ApiKey, ValidationError};

mod campaigns;
mod lists;
mod segments;
mod subscribers;
mod transactional;

pub use campaigns::CampaignsService;
pub use lists::ListsService;
pub use segments::SegmentsService;
pub use subscribers::SubscribersService;
pub use transactional::TransactionalService;

const DEFAULT_ENDPOINT: &str = "https://api.sitecoresend.io/v3/";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        method: HttpMethod,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        method: HttpMethod,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let builder = match method {
                HttpMethod::Get => self.client.get(url),
                HttpMethod::Post => self.client.post(url),
                HttpMethod::Delete => self.client.delete(url),
            };
            let builder = match &body {
                Some(json) => builder.json(json),
                None => builder,
            };
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Faults raised by [`SendClient`].
///
/// These cover "we could not complete the request": transport failures,
/// authentication rejections, unexpected HTTP statuses, and unparseable
/// bodies. Expected domain failures (a missing list, a duplicate field name)
/// are not faults; they come back inside [`crate::domain::Envelope`].
pub enum SendError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The remote service rejected the API key (HTTP 401/403).
    #[error("authentication failed with HTTP status {status}")]
    Authentication { status: u16 },

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A request URL could not be built from the configured endpoint.
    #[error("invalid request URL: {0}")]
    Url(#[source] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SendError {
    pub(crate) fn parse(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// Shared per-tenant context: one API key, one base endpoint, one transport.
///
/// Immutable once built, so any number of services and derived clients can
/// hold it concurrently without coordination.
pub(crate) struct Connection {
    pub(crate) api_key: ApiKey,
    pub(crate) base_url: Url,
    pub(crate) http: Arc<dyn HttpTransport>,
}

impl Connection {
    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, SendError> {
        let mut url = self
            .base_url
            .join(&format!("{path}.json"))
            .map_err(SendError::Url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(ApiKey::FIELD, self.api_key.as_str());
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    pub(crate) async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<String, SendError> {
        let url = self.endpoint(path, query)?;
        // The full URL carries the API key; log the path only.
        debug!(method = method.as_str(), path, "send API request");

        let response = self
            .http
            .execute(method, url, body)
            .await
            .map_err(SendError::Transport)?;

        if response.status == 401 || response.status == 403 {
            return Err(SendError::Authentication {
                status: response.status,
            });
        }
        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SendError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, SendError> {
        self.call(HttpMethod::Get, path, query, None).await
    }

    pub(crate) async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<String, SendError> {
        self.call(HttpMethod::Post, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<String, SendError> {
        self.call(HttpMethod::Delete, path, &[], None).await
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SendClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct SendClientBuilder {
    api_key: ApiKey,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SendClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base endpoint URL (e.g. for a regional deployment).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SendClient`].
    pub fn build(self) -> Result<SendClient, SendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| SendError::Transport(Box::new(err)))?;

        let base_url = parse_base_url(&self.endpoint)?;
        Ok(SendClient::from_connection(Arc::new(Connection {
            api_key: self.api_key,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })))
    }
}

/// Relative path joins drop the last segment unless the base ends in `/`.
fn parse_base_url(endpoint: &str) -> Result<Url, SendError> {
    let normalized = if endpoint.ends_with('/') {
        endpoint.to_owned()
    } else {
        format!("{endpoint}/")
    };
    Url::parse(&normalized).map_err(SendError::Url)
}

#[derive(Clone)]
/// High-level Sitecore Send client.
///
/// One client is scoped to one API key (tenant). The per-resource services
/// hang off accessor methods and share a single connection:
///
/// ```rust,no_run
/// use moosend::{ApiKey, SendClient};
///
/// # async fn run() -> Result<(), moosend::SendError> {
/// let client = SendClient::new(ApiKey::new("...")?);
/// let lists = client.lists().get_all().await?;
/// # Ok(())
/// # }
/// ```
pub struct SendClient {
    connection: Arc<Connection>,
    lists: ListsService,
    subscribers: SubscribersService,
    campaigns: CampaignsService,
    segments: SegmentsService,
    transactional: TransactionalService,
}

impl SendClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`SendClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        let base_url = Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL");
        Self::from_connection(Arc::new(Connection {
            api_key,
            base_url,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }))
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> SendClientBuilder {
        SendClientBuilder::new(api_key)
    }

    pub(crate) fn from_connection(connection: Arc<Connection>) -> Self {
        Self {
            lists: ListsService::new(Arc::clone(&connection)),
            subscribers: SubscribersService::new(Arc::clone(&connection)),
            campaigns: CampaignsService::new(Arc::clone(&connection)),
            segments: SegmentsService::new(Arc::clone(&connection)),
            transactional: TransactionalService::new(Arc::clone(&connection)),
            connection,
        }
    }

    /// Derive a client for another tenant, reusing the HTTP transport.
    ///
    /// The returned client is independent: calls made through it use the new
    /// key, while this client keeps using its own. Nothing is shared mutably,
    /// so the two can be used concurrently or nested freely.
    pub fn with_api_key(&self, api_key: ApiKey) -> Self {
        Self::from_connection(Arc::new(Connection {
            api_key,
            base_url: self.connection.base_url.clone(),
            http: Arc::clone(&self.connection.http),
        }))
    }

    /// Mailing-list operations.
    pub fn lists(&self) -> &ListsService {
        &self.lists
    }

    /// Subscriber operations.
    pub fn subscribers(&self) -> &SubscribersService {
        &self.subscribers
    }

    /// Campaign operations.
    pub fn campaigns(&self) -> &CampaignsService {
        &self.campaigns
    }

    /// Segment operations.
    pub fn segments(&self) -> &SegmentsService {
        &self.segments
    }

    /// Transactional send operations.
    pub fn transactional(&self) -> &TransactionalService {
        &self.transactional
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FakeTransport, make_client};
    use super::*;
    use crate::domain::{KnownError, MailingListRequest};

    const OK_ID_BODY: &str =
        r#"{"Code":0,"Error":null,"Context":"2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae"}"#;

    #[tokio::test]
    async fn create_list_includes_api_key_and_parses_id() {
        let transport = FakeTransport::new(200, OK_ID_BODY);
        let client = make_client("test_key", transport.clone());

        let envelope = client
            .lists()
            .create(&MailingListRequest::named("Test Name"))
            .await
            .unwrap();
        assert!(envelope.is_success());
        assert_eq!(
            envelope.into_data(),
            Some("2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap())
        );

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Post));
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/v3/lists/create.json?apikey=test_key")
        );
        assert_eq!(body.unwrap()["Name"], "Test Name");
    }

    #[tokio::test]
    async fn domain_error_is_returned_in_envelope_not_raised() {
        let body = r#"{"Code":404,"Error":"LIST_NOT_FOUND","Context":null}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client("test_key", transport);

        let envelope = client.lists().get(uuid::Uuid::new_v4()).await.unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error, Some(KnownError::ListNotFound));
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_authentication_fault() {
        let transport = FakeTransport::new(401, "");
        let client = make_client("bad_key", transport);

        let err = client.lists().get_all().await.unwrap_err();
        assert!(matches!(err, SendError::Authentication { status: 401 }));
    }

    #[tokio::test]
    async fn server_error_maps_to_http_status_fault() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client("test_key", transport);

        let err = client.lists().get_all().await.unwrap_err();
        assert!(matches!(
            err,
            SendError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_error_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client("test_key", transport);

        let err = client.lists().get_all().await.unwrap_err();
        assert!(matches!(
            err,
            SendError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn malformed_json_maps_to_parse_fault() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client("test_key", transport);

        let err = client.lists().get_all().await.unwrap_err();
        assert!(matches!(err, SendError::Parse(_)));
    }

    #[tokio::test]
    async fn with_api_key_switches_tenant_without_touching_original() {
        let body = r#"{"Code":0,"Error":null,"Context":{"MailingLists":[]}}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client("default_key", transport.clone());
        let other = client.with_api_key(ApiKey::new("client1_key").unwrap());

        let envelope = other.lists().get_all().await.unwrap();
        assert!(envelope.is_success());
        let (_, url, _) = transport.last_request();
        assert!(url.unwrap().contains("apikey=client1_key"));

        let envelope = client.lists().get_all().await.unwrap();
        assert!(envelope.is_success());
        let (_, url, _) = transport.last_request();
        assert!(url.unwrap().contains("apikey=default_key"));
    }

    #[test]
    fn builder_endpoint_override_is_applied() {
        let client = SendClient::builder(ApiKey::new("key").unwrap())
            .endpoint("https://example.invalid/v3")
            .build()
            .unwrap();
        assert_eq!(
            client.connection.base_url.as_str(),
            "https://example.invalid/v3/"
        );

        let client = SendClient::builder(ApiKey::new("key").unwrap())
            .endpoint("https://example.invalid/v3/")
            .timeout(Duration::from_secs(5))
            .user_agent("moosend-tests")
            .build()
            .unwrap();
        assert_eq!(
            client.connection.base_url.as_str(),
            "https://example.invalid/v3/"
        );
    }

    #[test]
    fn builder_rejects_invalid_endpoint() {
        let result = SendClient::builder(ApiKey::new("key").unwrap())
            .endpoint("not a url")
            .build();
        match result {
            Err(SendError::Url(_)) => {}
            Err(other) => panic!("expected Url fault, got: {other:?}"),
            Ok(_) => panic!("expected Url fault, got a client"),
        }
    }
}
