//! HTTP client for talking to the SearXNG backend

use super::user_agent::{accept_json, accept_language, client_user_agent};
use crate::config::OutgoingSettings;
use crate::error::ClientError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// A backend response that completed with a 2xx status
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

/// HTTP client wrapper configured from the outgoing settings
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ClientError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, ClientError> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout).map_err(|e| {
            ClientError::Config(format!("bad request timeout {}: {}", settings.request_timeout, e))
        })?;
        let mut builder = Client::builder().timeout(timeout).gzip(true).brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        // Extra headers go on every request
        let mut headers = HeaderMap::new();
        for (key, value) in &settings.extra_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ClientError::Config(format!("bad header name {}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Config(format!("bad header value for {}: {}", key, e)))?;
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);

        Ok(Self {
            client: builder.build()?,
            user_agent: client_user_agent(settings.useragent_suffix.as_deref()),
        })
    }

    /// GET a JSON document; non-2xx statuses are errors
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
        lang: Option<&str>,
    ) -> Result<JsonResponse, ClientError> {
        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, accept_json());

        if let Some(lang) = lang {
            request = request.header(ACCEPT_LANGUAGE, accept_language(lang));
        }
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("GET {} -> {}", response.url(), status);

        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body = serde_json::from_str(&text)?;

        Ok(JsonResponse {
            status: status.as_u16(),
            body,
        })
    }
}
