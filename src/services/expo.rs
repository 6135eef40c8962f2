use crate::models::PushMessage;
use crate::services::store::{PushSender, StoreError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Errors from the Expo push API
#[derive(Debug, Error)]
pub enum PushError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Expo push API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Expo ticket error: {0}")]
    TicketError(String),
}

impl From<PushError> for StoreError {
    fn from(err: PushError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ExpoMessage<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    data: &'a serde_json::Value,
    sound: &'static str,
}

#[derive(Debug, Deserialize)]
struct ExpoResponse {
    data: ExpoTicket,
}

#[derive(Debug, Deserialize)]
struct ExpoTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Expo push notification client
pub struct ExpoClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl ExpoClient {
    pub fn new(access_token: Option<String>) -> Result<Self, PushError> {
        Self::with_endpoint(EXPO_PUSH_URL.to_string(), access_token)
    }

    /// Point the client at a different push endpoint
    pub fn with_endpoint(endpoint: String, access_token: Option<String>) -> Result<Self, PushError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }

    /// Send a push notification to an Expo push token
    pub async fn send_notification(&self, message: &PushMessage) -> Result<(), PushError> {
        let payload = ExpoMessage {
            to: &message.to,
            title: &message.title,
            body: &message.body,
            data: &message.data,
            sound: "default",
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);

        // Access token raises rate limits
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        tracing::debug!("Sending Expo push notification to: {}", message.to);

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Expo push failed {}: {}", status, body);
            return Err(PushError::ApiError(status, body));
        }

        let expo_response: ExpoResponse = response.json().await?;

        if expo_response.data.status == "error" {
            let message = expo_response.data.message.unwrap_or_default();
            return Err(PushError::TicketError(message));
        }

        Ok(())
    }
}

#[async_trait]
impl PushSender for ExpoClient {
    async fn send(&self, message: &PushMessage) -> Result<(), StoreError> {
        Ok(self.send_notification(message).await?)
    }
}
