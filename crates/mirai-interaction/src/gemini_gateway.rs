//! GeminiGateway - Direct REST API implementation for Gemini.
//!
//! This gateway calls the Gemini REST API directly without SDK dependency,
//! with Google Search grounding enabled on every request. Configuration is
//! the `GEMINI_API_KEY` environment variable.

use async_trait::async_trait;
use mirai_core::MiraiError;
use mirai_core::error::Result;
use mirai_core::gateway::{GatewayReply, ModelGateway, Turn};
use mirai_core::project::{Citation, MessageRole};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gateway implementation that talks to the Gemini HTTP API.
///
/// No timeout is configured: a hung call simply leaves the conversation
/// cycle in flight until the transport gives up.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiGateway {
    /// Creates a new gateway with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            system_instruction: None,
        }
    }

    /// Creates a gateway from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the variable is missing or empty.
    pub fn try_from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                MiraiError::config(format!("{} environment variable is not set", API_KEY_ENV))
            })?;
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    fn build_request(&self, history: &[Turn], input: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: input.to_string(),
            }],
        });

        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| MiraiError::gateway(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(MiraiError::gateway(format!(
                "Gemini API returned {}: {}",
                status,
                error_message(&body_text)
            )));
        }

        response
            .json()
            .await
            .map_err(|err| MiraiError::gateway(format!("Failed to parse Gemini response: {err}")))
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn send(&self, history: &[Turn], input: &str) -> Result<GatewayReply> {
        let request = self.build_request(history, input);
        tracing::debug!(
            model = %self.model,
            turns = history.len(),
            "Sending generateContent request"
        );
        let response = self.send_request(&request).await?;
        Ok(extract_reply(response))
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        // The Gemini API names the assistant role "model".
        let role = match turn.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding chunk. The provider tags chunks by kind; kinds other than
/// `web` and `maps` deserialize with both fields absent and are dropped.
#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<SourceRef>,
    maps: Option<SourceRef>,
}

#[derive(Deserialize)]
struct SourceRef {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_reply(response: GenerateContentResponse) -> GatewayReply {
    let Some(candidate) = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
    else {
        // An empty reply is a success case; the orchestrator substitutes
        // the apology string.
        return GatewayReply::default();
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let citations = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(chunk_to_citation)
                .collect()
        })
        .unwrap_or_default();

    GatewayReply { text, citations }
}

fn chunk_to_citation(chunk: GroundingChunk) -> Option<Citation> {
    if let Some(web) = chunk.web {
        return Some(Citation::Web {
            uri: web.uri?,
            title: web.title,
        });
    }
    if let Some(place) = chunk.maps {
        return Some(Citation::MapsPlace {
            uri: place.uri?,
            title: place.title,
        });
    }
    None
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string())
}
