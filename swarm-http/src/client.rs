//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::{ApiRequest, ApiResponse};
use reqwest::Client;
use tracing::{debug, trace};

/// Transport used by simulated users
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// Send one request and return its status and body
    ///
    /// Non-success statuses are not errors; only transport failures are.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}

/// Pooled `reqwest` client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpManager {
    client: Client,
    base_url: String,
    config: HttpConfig,
}

impl HttpManager {
    /// Create a client for `base_url` with specific configuration
    pub fn new(base_url: &str, config: HttpConfig) -> Result<Self, HttpError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(base_url.to_string()));
        }

        debug!(
            "Creating HttpManager for {} with timeout: {}s",
            base_url,
            config.timeout.as_secs()
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Create a client with default configuration
    pub fn with_defaults(base_url: &str) -> Result<Self, HttpError> {
        Self::new(base_url, HttpConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait::async_trait]
impl ApiClient for HttpManager {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let url = self.url_for(&request.path);
        debug!("Sending {} {}", request.method, url);

        let mut builder = self
            .client
            .request(reqwest::Method::from(request.method), &url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            trace!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "{} {} completed", request.method, url);

        Ok(ApiResponse { status, body })
    }
}
