//! OpenAI-compatible completion client.
//!
//! A single [`OpenAiCompatibleClient`] talks to Groq (the default) or any
//! other endpoint that speaks the OpenAI `chat/completions` protocol, via a
//! configurable base URL.
//!
//! Uses [`async_openai`] for type-safe request/response handling and
//! built-in SSE streaming.

pub mod streaming;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionStreamOptions,
    CreateChatCompletionRequest,
};
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use cstore_core::llm::{CompletionClient, CompletionStream};
use cstore_types::config::CompletionConfig;
use cstore_types::llm::{CompletionRequest, LlmError, MessageRole};

use self::streaming::{map_openai_error, map_openai_stream};

/// Client for any OpenAI-compatible chat completion API.
///
/// The API key is supplied per request, so this type holds no secret and
/// a single instance can serve every session.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    provider_name: String,
    base_url: String,
}

impl OpenAiCompatibleClient {
    pub fn new(provider_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(&config.provider_name, &config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a [`CreateChatCompletionRequest`] from a [`CompletionRequest`].
    ///
    /// The system instruction goes first, followed by the transcript.
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(system_message(system));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => system_message(&msg.content),
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        let mut req = CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        };

        if request.stream {
            req.stream = Some(true);
            req.stream_options = Some(ChatCompletionStreamOptions {
                include_usage: Some(true),
                include_obfuscation: None,
            });
        }

        req
    }
}

fn system_message(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(content.to_string()),
        name: None,
    })
}

impl CompletionClient for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn stream(&self, request: CompletionRequest, api_key: &SecretString) -> CompletionStream {
        if !request.stream {
            return Box::pin(futures_util::stream::once(async {
                Err(LlmError::InvalidRequest(
                    "streaming must be enabled on the request".to_string(),
                ))
            }));
        }

        let oai_request = self.build_request(&request);
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(&self.base_url);
        let client = Client::with_config(openai_config);

        tracing::debug!(
            provider = %self.provider_name,
            model = %oai_request.model,
            messages = oai_request.messages.len(),
            "opening completion stream"
        );

        Box::pin(async_stream::try_stream! {
            let oai_stream = client
                .chat()
                .create_stream(oai_request)
                .await
                .map_err(map_openai_error)?;

            let mut inner = map_openai_stream(oai_stream);

            while let Some(event) = inner.next().await {
                yield event?;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstore_types::llm::{DEFAULT_MAX_TOKENS, Message};

    fn client() -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::from_config(&CompletionConfig::default())
    }

    #[test]
    fn test_from_config_defaults_to_groq() {
        let client = client();
        assert_eq!(client.name(), "groq");
        assert_eq!(client.base_url(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_build_request_puts_system_first() {
        let request = CompletionRequest::chat(
            "행사 전문가".to_string(),
            vec![
                Message {
                    role: MessageRole::User,
                    content: "안녕".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "안녕하세요".to_string(),
                },
                Message {
                    role: MessageRole::User,
                    content: "막걸리 안주".to_string(),
                },
            ],
        );

        let oai_req = client().build_request(&request);

        assert_eq!(oai_req.model, "llama3-70b-8192");
        assert_eq!(oai_req.messages.len(), 4);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_req.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert_eq!(oai_req.max_completion_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(oai_req.temperature, Some(0.7));
    }

    #[test]
    fn test_build_request_streaming_options() {
        let request = CompletionRequest::chat("s".to_string(), vec![]);
        let oai_req = client().build_request(&request);

        assert_eq!(oai_req.stream, Some(true));
        let opts = oai_req.stream_options.unwrap();
        assert_eq!(opts.include_usage, Some(true));
    }

    #[tokio::test]
    async fn test_stream_rejects_non_streaming_request() {
        let mut request = CompletionRequest::chat("s".to_string(), vec![]);
        request.stream = false;

        let mut stream = client().stream(request, &SecretString::from("gsk_test"));
        let first = stream.next().await.unwrap();

        assert!(matches!(first, Err(LlmError::InvalidRequest(_))));
        assert!(stream.next().await.is_none());
    }
}
