//! services/cli/src/adapters/gemini_llm.rs
//!
//! This module contains the adapter for the recommendation LLM.
//! It implements the `RecommendationService` port from the `core` crate by calling
//! Gemini through its OpenAI-compatible chat-completions endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use cinematcher_core::{
    domain::{MatchResult, TimeBucket},
    ports::{PortError, PortResult, RecommendationService},
    prompt::{build_prompt, match_result_schema, parse_match_result, SCHEMA_NAME},
};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `RecommendationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct GeminiMatchAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiMatchAdapter {
    /// Creates a new `GeminiMatchAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client for a Gemini-compatible base URL and key.
    ///
    /// Each call is a single attempt: the backoff gives up on the first failure,
    /// so 429 and 5xx replies surface instead of being retried.
    pub fn client_for(api_base: &str, api_key: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(api_base.trim_end_matches('/'))
            .with_api_key(api_key);
        let single_attempt = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Client::with_config(config).with_backoff(single_attempt)
    }
}

/// Keeps the upstream message when the service sent one.
fn upstream_error(e: OpenAIError) -> PortError {
    match e {
        OpenAIError::ApiError(api) => PortError::Service(api.message),
        other => PortError::Service(other.to_string()),
    }
}

//=========================================================================================
// `RecommendationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecommendationService for GeminiMatchAdapter {
    /// Sends one prompt with the declared output schema and parses the reply.
    async fn fetch_match(&self, time: TimeBucket, clues: &[String]) -> PortResult<MatchResult> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_prompt(time, clues))
                .build()
                .map_err(upstream_error)?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: SCHEMA_NAME.to_string(),
                    description: Some("Tre raccomandazioni con spiegazioni".to_string()),
                    schema: Some(match_result_schema()),
                    strict: Some(false),
                },
            })
            .build()
            .map_err(upstream_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(upstream_error)?;

        // No choice or no content is parsed like an empty reply.
        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!(bytes = raw.len(), model = %self.model, "Received recommendation reply");

        parse_match_result(&raw)
    }
}
