//! `Transport` backed by reqwest.
//!
//! No timeout is configured: a hung request leaves its submission pending
//! while the rest of the view keeps running.

use std::future::Future;

use reqwest::{Client, Method};
use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let verb = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(verb, &path);
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        async move {
            debug!(method = method.as_str(), %path, "sending request");
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                .collect();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            debug!(status, "received response");
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
