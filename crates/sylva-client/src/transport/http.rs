//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use sylva_core::ApiError;
use sylva_core::ports::{ApiRequest, HttpTransport, Method, RawResponse, RequestBody};

/// Transport talking to one backend base URL.
///
/// No timeout beyond reqwest's defaults and no retries.
#[derive(Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Share one connection pool between several backends.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        // Strip trailing slash for consistent URL construction
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(method(request.method), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                builder.multipart(Form::new().part(file.field_name, part))
            }
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, url = %url, error = %e, "API call failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_vec();

        tracing::debug!(method = %request.method, url = %url, status, "API call");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new("https://api.example.com/v1/");
        assert_eq!(transport.base_url(), "https://api.example.com/v1");
        assert_eq!(transport.url("/articles"), "https://api.example.com/v1/articles");
        assert_eq!(transport.url("tags"), "https://api.example.com/v1/tags");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport = ReqwestTransport::new("http://127.0.0.1:9");
        let err = transport.send(ApiRequest::get("/articles")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
