//! HTTP request builder.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};

use super::client::HttpClient;
use super::response::HttpResponse;
use crate::error::Result;

/// Builder for a POST request.
pub struct HttpRequestBuilder {
    client: HttpClient,
    url: String,
    headers: HeaderMap,
    body: Option<String>,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, url: String) -> Self {
        Self {
            client,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a header to the request.
    ///
    /// Fails with [`Error::InvalidHeader`](crate::Error::InvalidHeader) if the
    /// name or value is not valid HTTP.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add already-validated headers to the request.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Set a plain text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a timeout for this specific request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send the request and wait for the response headers.
    pub async fn send(self) -> Result<HttpResponse> {
        let url = url::Url::parse(&self.url)?;

        let mut req_builder = self
            .client
            .reqwest_client()
            .post(url)
            .headers(self.headers);

        if let Some(timeout) = self.timeout {
            req_builder = req_builder.timeout(timeout);
        }
        if let Some(body) = self.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}
