//! Generative-chat adapter with a query-keyed credential, matching
//! providers whose API key travels as a `?key=` query parameter rather
//! than a header.

use async_trait::async_trait;
use sentinel_registry::ModelDescriptor;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::adapter::ProviderAdapter;
use crate::error::ProviderError;
use crate::prompts::build_prompt;
use crate::types::{RawResponse, ResponseFamily};

#[derive(Serialize)]
struct GenerativeQueryKeyedRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

pub struct GenerativeQueryKeyedAdapter {
    client: reqwest::Client,
}

impl GenerativeQueryKeyedAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderAdapter for GenerativeQueryKeyedAdapter {
    async fn call(
        &self,
        descriptor: &ModelDescriptor,
        candidate: &str,
        deadline: Duration,
    ) -> Result<RawResponse, ProviderError> {
        let credential = descriptor
            .resolve_credential()
            .ok_or_else(|| ProviderError::MissingCredential(descriptor.credential_ref.clone()))?;

        let body = GenerativeQueryKeyedRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(candidate),
                }],
            }],
        };

        let response = self
            .client
            .post(&descriptor.endpoint)
            .timeout(deadline)
            .query(&[("key", credential.as_str())])
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

        let parsed: GenerativeQueryKeyedReply =
            response
                .json()
                .await
                .map_err(|e| ProviderError::Decode {
                    model: descriptor.name.clone(),
                    reason: e.to_string(),
                })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ProviderError::Decode {
                model: descriptor.name.clone(),
                reason: "no candidates in generative reply".to_string(),
            })?;

        Ok(RawResponse::new(ResponseFamily::Generative, text.into_bytes()))
    }
}

#[derive(Deserialize)]
struct GenerativeQueryKeyedReply {
    candidates: Vec<Candidate>,
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
