// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use taskchat_core::TaskchatError;
use tracing::debug;

use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key. Never sent as a query parameter.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for Gemini API communication.
///
/// Sends exactly one request per call. The API key is supplied per request
/// because the host may change it between calls.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(
        base_url: String,
        model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, TaskchatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TaskchatError::Provider {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one `generateContent` request.
    ///
    /// Any status other than 200 is returned as [`TaskchatError::Api`] with
    /// the raw response body.
    pub async fn generate_content(
        &self,
        api_key: &SecretString,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TaskchatError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| TaskchatError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, key)
            .json(request)
            .send()
            .await
            .map_err(|e| TaskchatError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskchatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| TaskchatError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| TaskchatError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
