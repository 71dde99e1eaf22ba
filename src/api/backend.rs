//! HTTP client for the school REST backend

use axum::body::Bytes;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// Backend response as the proxy hands it back to the browser
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub set_cookies: Vec<String>,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One outgoing request to the backend
#[derive(Debug, Clone, Default)]
pub struct BackendRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub cookie: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub body: Bytes,
}

/// Client for the configured backend base URL; cookies travel with every call
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Redirects belong to the browser, not the proxy
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute backend URL for a path, with or without a leading slash
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{}/{}?{}", self.base_url, path, q),
            None => format!("{}/{}", self.base_url, path),
        }
    }

    /// Forward a request and collect the full response
    pub async fn forward(&self, method: Method, req: BackendRequest<'_>) -> Result<BackendResponse> {
        let mut builder = self.http.request(method, self.url(req.path, req.query));
        if let Some(cookie) = req.cookie.filter(|c| !c.is_empty()) {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(content_type) = req.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !req.body.is_empty() {
            builder = builder.body(req.body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.bytes().await?;

        Ok(BackendResponse {
            status,
            content_type,
            set_cookies,
            body,
        })
    }

    /// GET a JSON entity on behalf of a browser
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str, cookie: &str) -> Result<T> {
        let response = self
            .forward(
                Method::GET,
                BackendRequest {
                    path,
                    cookie: Some(cookie),
                    ..Default::default()
                },
            )
            .await?;

        if !response.is_success() {
            return Err(Error::BackendStatus {
                status: response.status,
                path: path.to_string(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let backend = client("http://localhost:8080/");
        assert_eq!(backend.base_url(), "http://localhost:8080");
        assert_eq!(backend.url("/auth/login", None), "http://localhost:8080/auth/login");
        assert_eq!(backend.url("admin/users", Some("")), "http://localhost:8080/admin/users");
        assert_eq!(
            backend.url("admin/results/filter", Some("classId=3")),
            "http://localhost:8080/admin/results/filter?classId=3"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let backend = client("http://127.0.0.1:1");
        let result = backend
            .fetch_json::<serde_json::Value>("/admin/reports/summary", "")
            .await;
        assert!(matches!(result, Err(Error::Backend(_))));
    }
}
