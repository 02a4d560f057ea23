use crate::{
    apis::{IncidentApi, TableApi},
    auth::{Authentication, Credentials},
    error::{SnowError, SnowResult},
    query::QueryOptions,
};
use bytes::Bytes;
use log::debug;
use reqwest::{
    header::{HeaderMap, ACCEPT},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use url::Url;

/// Client-level timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON: &str = "application/json";

/// Main Table API client
#[derive(Clone)]
pub struct SnowClient {
    client: Client,
    credentials: Arc<Credentials>,
}

impl SnowClient {
    /// Create a new client with the default timeout
    pub fn new(credentials: Credentials) -> SnowResult<Self> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom client-level timeout
    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> SnowResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, credentials))
    }

    /// Create a new client with custom reqwest client
    pub fn with_client(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials: Arc::new(credentials),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get generic Table API
    pub fn table(&self) -> TableApi<'_> {
        TableApi::new(self)
    }

    /// Get Incident API
    pub fn incidents(&self) -> IncidentApi<'_> {
        IncidentApi::new(self)
    }

    /// Resolve `path` against the instance URL and attach the encoded query.
    ///
    /// The instance URL is parsed here rather than at construction, so a
    /// malformed one is reported by the first request.
    pub fn resolve(&self, path: &str, query: Option<&QueryOptions>) -> SnowResult<Url> {
        let mut base = Url::parse(self.credentials.instance_url())?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let mut url = base.join(path.trim_start_matches('/'))?;
        match query {
            Some(query) if !query.is_empty() => url.set_query(Some(&query.encode())),
            _ => url.set_query(None),
        }

        Ok(url)
    }

    /// Build an authenticated JSON request to the given URL
    pub async fn request(&self, method: Method, url: Url) -> SnowResult<RequestBuilder> {
        debug!("HTTP {} {}", method, url);
        let mut request = self.client.request(method, url).header(ACCEPT, JSON);

        let mut headers = HeaderMap::new();
        self.credentials.apply_auth(&mut headers).await?;
        request = request.headers(headers);

        Ok(request)
    }

    /// Send a request and reject 401 and other non-2xx statuses.
    ///
    /// On rejection the body is drained before the error is returned.
    pub async fn execute(&self, request: RequestBuilder) -> SnowResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        if let Err(e) = response.bytes().await {
            debug!("Failed to drain error body from {}: {}", url, e);
        }
        debug!("HTTP {} from {}", status, url);

        match status {
            StatusCode::UNAUTHORIZED => Err(SnowError::Unauthorized),
            _ => Err(SnowError::unexpected_status(status, url)),
        }
    }

    pub async fn get(&self, path: &str, query: Option<&QueryOptions>) -> SnowResult<Response> {
        let url = self.resolve(path, query)?;
        let request = self.request(Method::GET, url).await?;
        self.execute(request).await
    }

    pub async fn delete(&self, path: &str, query: Option<&QueryOptions>) -> SnowResult<Response> {
        let url = self.resolve(path, query)?;
        let request = self.request(Method::DELETE, url).await?;
        self.execute(request).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> SnowResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> SnowResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> SnowResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path, None)?;
        let request = self.request(method, url).await?.json(body);

        self.execute(request).await
    }

    /// Consume a response into its headers and full body
    pub async fn read_body(response: Response) -> SnowResult<(HeaderMap, Bytes)> {
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok((headers, body))
    }
}
