//! Uniform request path for every API call.
//!
//! Each call:
//!   * joins the endpoint onto the base URL
//!   * sends JSON (uploads send multipart and let reqwest set the boundary)
//!   * aborts after the configured timeout with `ApiError::Timeout`
//!   * maps non-2xx responses to `ApiError::Status` with the parsed body

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::body::ApiBody;
use crate::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiBody, ApiError> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiBody, ApiError> {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiBody, ApiError> {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiBody, ApiError> {
        self.request(Method::PATCH, endpoint, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiBody, ApiError> {
        self.request(Method::DELETE, endpoint, None::<&()>).await
    }

    /// Send a JSON request (no body when `body` is `None`).
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<ApiBody, ApiError> {
        let url = self.url(endpoint);
        info!(%method, %url, "api request");
        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        self.execute(builder, "API request failed").await
    }

    /// POST a multipart form. No content type is set here so the form's
    /// boundary header is used as is.
    pub async fn upload(&self, endpoint: &str, form: Form) -> Result<ApiBody, ApiError> {
        let url = self.url(endpoint);
        info!(%url, "api upload (multipart)");
        let builder = self.http.post(&url).multipart(form);
        self.execute(builder, "Upload failed").await
    }

    async fn execute(&self, builder: RequestBuilder, failure: &str) -> Result<ApiBody, ApiError> {
        let response = self.with_timeout_guard(builder.send()).await?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        info!(status = status.as_u16(), %status_text, "api response");

        let body = self.with_timeout_guard(read_body(response)).await?;

        if !status.is_success() {
            let body = body.ok();
            let message = body
                .as_ref()
                .and_then(ApiBody::error_message)
                .unwrap_or_else(|| format!("{failure}: {status_text}"));
            error!(status = status.as_u16(), %message, "api error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text,
                message,
                body,
            });
        }
        let body = body?;
        debug!(?body, "api success");
        Ok(body)
    }

    async fn with_timeout_guard<T, F>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, reqwest::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Err(_) => Err(ApiError::Timeout),
            Ok(Err(err)) if err.is_timeout() => Err(ApiError::Timeout),
            Ok(Err(err)) => {
                error!(error = %err, "api network error");
                Err(ApiError::Network(err))
            }
            Ok(Ok(value)) => Ok(value),
        }
    }
}

/// Read the body, keeping a JSON decode failure separate from transport errors.
async fn read_body(response: Response) -> Result<Result<ApiBody, ApiError>, reqwest::Error> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let raw = response.text().await?;
    Ok(ApiBody::parse(content_type.as_deref(), raw).map_err(ApiError::from))
}
