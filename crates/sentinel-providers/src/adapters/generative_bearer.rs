//! Generative-chat adapter with a header bearer credential, matching
//! OpenAI-compatible chat-completion endpoints.

use async_trait::async_trait;
use sentinel_registry::ModelDescriptor;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::prompts::SYSTEM_PROMPT;
use crate::types::{RawResponse, ResponseFamily};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct GenerativeBearerAdapter {
    client: reqwest::Client,
}

impl GenerativeBearerAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderAdapter for GenerativeBearerAdapter {
    async fn call(
        &self,
        descriptor: &ModelDescriptor,
        candidate: &str,
        deadline: Duration,
    ) -> Result<RawResponse, ProviderError> {
        let credential = descriptor
            .resolve_credential()
            .ok_or_else(|| ProviderError::MissingCredential(descriptor.credential_ref.clone()))?;

        let body = ChatRequest {
            model: &descriptor.remote_id,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: candidate,
                },
            ],
        };

        let response = self
            .client
            .post(&descriptor.endpoint)
            .timeout(deadline)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|source| to_provider_error(&descriptor.name, deadline, source))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %descriptor.name, %status, "generative provider returned non-200");
            return Err(ProviderError::NonSuccessStatus {
                model: descriptor.name.clone(),
                status: status.as_u16(),
                body_excerpt: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatReply = response.json().await.map_err(|e| ProviderError::Decode {
            model: descriptor.name.clone(),
            reason: e.to_string(),
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Decode {
                model: descriptor.name.clone(),
                reason: "no choices in chat reply".to_string(),
            })?;

        Ok(RawResponse::new(ResponseFamily::Generative, text.into_bytes()))
    }
}

fn to_provider_error(model: &str, deadline: Duration, source: reqwest::Error) -> ProviderError {
    if source.is_timeout() {
        ProviderError::Timeout {
            model: model.to_string(),
            elapsed_millis: deadline.as_millis() as u64,
        }
    } else {
        ProviderError::Network {
            model: model.to_string(),
            source,
        }
    }
}
