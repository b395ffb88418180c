use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, instrument};
use venmo_core::{HttpMethod, RawRequest, RawResponse, Transport, TransportError};
use venmo_domain::constants::DEFAULT_TIMEOUT_SECS;
use venmo_domain::{ClientConfig, ConfigError};

use crate::errors::{builder_error, InfraError};

const DEFAULT_USER_AGENT: &str = concat!("venmo-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP client with a per-request timeout.
///
/// Sends each request exactly once; any status code is handed back to the
/// caller untouched.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Client honoring the timeout and user agent of `config`.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the TLS backend cannot be initialized.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// # Errors
    /// Returns a [`TransportError`] when no response was received.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let request = builder.build().map_err(InfraError::from)?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    fn prepare(&self, request: RawRequest) -> Result<RequestBuilder, TransportError> {
        let RawRequest { method, url, headers, body } = request;

        let mut builder = self.request(to_reqwest_method(method), url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|e| TransportError::Request(format!("failed to encode body: {e}")))?;
            builder = builder.body(bytes);
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip_all, fields(method = %request.method))]
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let builder = self.prepare(request)?;
        let response = self.send(builder).await?;
        into_raw_response(response).await
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Buffer the whole response, keeping every header pair in received order.
async fn into_raw_response(response: Response) -> Result<RawResponse, TransportError> {
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect();
    let body = response.bytes().await.map_err(InfraError::from)?;

    Ok(RawResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_owned(),
        headers,
        body: body.to_vec(),
    })
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent with every request, under any set per request.
    #[must_use]
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient, ConfigError> {
        let agent = self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let mut builder = ReqwestClient::builder().timeout(self.timeout).user_agent(agent);

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| builder_error(&err))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::header::HeaderValue;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{p}", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn sends_headers_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .and(header("device-id", "device-123"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"client_id": "1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = RawRequest::new(HttpMethod::Post, url(&server, "/oauth/access_token"))
            .header("device-id", "device-123")
            .json(json!({"client_id": "1"}));

        let response = client.execute(request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.reason, "OK");
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body, json!({"access_token": "abc"}));
    }

    #[tokio::test]
    async fn error_statuses_are_not_transport_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client
            .execute(RawRequest::new(HttpMethod::Get, url(&server, "/users/bob")))
            .await
            .unwrap();

        assert_eq!(response.status, 429);
        assert_eq!(response.reason, "Too Many Requests");
        assert!(response
            .headers
            .iter()
            .any(|(name, value)| name == "retry-after" && value == "30"));
    }

    #[tokio::test]
    async fn delete_without_body_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/oauth/access_token"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = RawRequest::new(HttpMethod::Delete, url(&server, "/oauth/access_token"))
            .bearer("abc");

        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn applies_user_agent_and_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "venmo-test/1.0"))
            .and(header("x-app", "tests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let mut defaults = HeaderMap::new();
        defaults.insert("x-app", HeaderValue::from_static("tests"));
        let client = HttpClient::builder()
            .user_agent("venmo-test/1.0")
            .default_headers(defaults)
            .build()
            .unwrap();

        let response =
            client.execute(RawRequest::new(HttpMethod::Get, url(&server, "/"))).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn network_failure_is_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = HttpClient::new().unwrap();
        let request =
            RawRequest::new(HttpMethod::Get, Url::parse(&format!("http://{addr}/")).unwrap());

        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {err:?}");
    }

    #[test]
    fn from_config_accepts_custom_agent() {
        let config = ClientConfig {
            user_agent: Some("custom/2.0".into()),
            timeout_secs: 5,
            ..ClientConfig::default()
        };
        assert!(HttpClient::from_config(&config).is_ok());
    }
}
