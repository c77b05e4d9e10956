use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::{UpstreamPayload, UpstreamReply};

const GENERATE_PATH: &str = "/api/generate/code";
const HEALTH_PATH: &str = "/health";
const READY_TIMEOUT: Duration = Duration::from_secs(2);

/// Something that can turn a prompt payload into generated code.
#[async_trait]
pub trait CodeGenBackend: Send + Sync {

    async fn generate(&self, payload: &UpstreamPayload) -> Result<UpstreamReply, UpstreamError>;

    async fn ready(&self) -> bool;

}

// talks to the code generation microservice over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    generate_url: String,
    health_url: String
}

impl HttpBackend {

    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {

        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, base_url))

    }

    pub fn with_client(client: Client, base_url: &Url) -> Self {

        let base = base_url.as_str().trim_end_matches('/');

        HttpBackend {
            client,
            generate_url: format!("{}{}", base, GENERATE_PATH),
            health_url: format!("{}{}", base, HEALTH_PATH)
        }

    }

    pub fn generate_url(&self) -> &str {

        &self.generate_url

    }

}

#[async_trait]
impl CodeGenBackend for HttpBackend {

    async fn generate(&self, payload: &UpstreamPayload) -> Result<UpstreamReply, UpstreamError> {

        let response = self.client
            .post(&self.generate_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // an unreadable error body is treated like an empty one
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: error_message(status, &body)
            });
        }

        // read fully first so a dropped connection is told apart from bad json
        let bytes = response.bytes().await?;
        let reply: UpstreamReply = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(reply)

    }

    async fn ready(&self) -> bool {

        match self.client.get(&self.health_url).timeout(READY_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false
        }

    }

}

// pull a human readable message out of an upstream error body
fn error_message(status: StatusCode, body: &str) -> String {

    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let message = parsed["message"].as_str()
        .or_else(|| parsed["error"]["message"].as_str())
        .or_else(|| parsed["error"].as_str())
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(m) => m.to_string(),
        None => format!("Service responded with {}", status.as_u16())
    }

}
