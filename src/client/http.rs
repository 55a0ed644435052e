use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::client::error::{ClientError, ClientResult};
use crate::client::{EntityKind, QueryRequest, RemoteClient};

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Zone base URL including the REST version path.
    pub base_url: String,
    pub username: String,
    pub secret: String,
    pub integration_code: String,
    pub timeout: Duration,
}

/// reqwest-backed client for the PSA REST API.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Create a new client with the credential headers pre-set on every request.
    pub fn new(config: &HttpClientConfig) -> ClientResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::Configuration {
            message: format!("invalid base URL '{}': {}", base_url, e),
        })?;

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "apiintegrationcode", &config.integration_code)?;
        insert_header(&mut headers, "username", &config.username)?;
        insert_header(&mut headers, "secret", &config.secret)?;

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Configuration {
                message: e.to_string(),
            })?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for `path` relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "PSA API request");
        self.client.request(method, &url)
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the JSON body on success (`Value::Null` for an empty body),
    /// or a `ClientError::Api` on non-success status codes.
    pub async fn handle_response(response: Response) -> ClientResult<Value> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body)?);
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

impl RemoteClient for HttpClient {
    async fn get(&self, entity: EntityKind, id: i64) -> ClientResult<Value> {
        let response = self
            .request(Method::GET, &format!("/{}/{}", entity.path(), id))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn query(&self, entity: EntityKind, query: &QueryRequest) -> ClientResult<Value> {
        let response = self
            .request(Method::POST, &format!("/{}/query", entity.path()))
            .json(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create(&self, entity: EntityKind, payload: &Value) -> ClientResult<Value> {
        let response = self
            .request(Method::POST, &format!("/{}", entity.path()))
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update(&self, entity: EntityKind, payload: &Value) -> ClientResult<Value> {
        let response = self
            .request(Method::PATCH, &format!("/{}", entity.path()))
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create_child(
        &self,
        parent: EntityKind,
        parent_id: i64,
        child: EntityKind,
        payload: &Value,
    ) -> ClientResult<Value> {
        let response = self
            .request(
                Method::POST,
                &format!("/{}/{}/{}", parent.path(), parent_id, child.path()),
            )
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> ClientResult<()> {
    let value = HeaderValue::from_str(value).map_err(|_| ClientError::Configuration {
        message: format!("header '{}' contains invalid characters", name),
    })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// The API reports failures as `{"errors": ["..."]}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    let joined = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("errors").and_then(Value::as_array).map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ")
        })
    });

    match joined {
        Some(message) if !message.is_empty() => message,
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.to_string(),
    }
}
