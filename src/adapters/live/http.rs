//! Live adapter for the `HttpTransport` port using reqwest.

use std::collections::BTreeMap;

use reqwest::{Client, Method};

use crate::error::PortError;
use crate::ports::http::{HttpFuture, HttpRequest, HttpResponse, HttpTransport};

/// Live transport that sends requests over the network.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new live transport.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let method = Method::from_bytes(request.method.as_bytes())
                .map_err(|e| -> PortError { format!("invalid method {}: {e}", request.method).into() })?;

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| -> PortError {
                format!("{} {} failed: {e}", request.method, request.url).into()
            })?;

            let status = response.status().as_u16();
            let headers: BTreeMap<String, String> = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("failed to read response from {}: {e}", request.url).into()
            })?;

            Ok(HttpResponse { status, headers, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_method_is_rejected_before_sending() {
        let transport = ReqwestTransport::new();
        let request = HttpRequest::new("NOT A METHOD", "http://127.0.0.1:9/");
        let err = transport.send(&request).await.unwrap_err();
        assert!(err.to_string().contains("invalid method"));
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let transport = ReqwestTransport::new();
        // Port 9 (discard) is not expected to accept connections in CI.
        let request = HttpRequest::new("GET", "http://127.0.0.1:9/");
        assert!(transport.send(&request).await.is_err());
    }
}
