use super::{ChatMessage, ChatModel, OutputSchema};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Groq chat completions (OpenAI-compatible wire format)
pub struct GroqModel {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

impl GroqModel {
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_sec {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    async fn send(&self, request: &CompletionRequest<'_>) -> Result<ResponseMessage, ProviderError> {
        debug!(
            "[groq] Sending request: model={}, messages={}, tools={}",
            request.model,
            request.messages.len(),
            request.tools.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))
    }
}

#[async_trait]
impl ChatModel for GroqModel {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            tools: None,
            tool_choice: None,
        };

        let message = self.send(&request).await?;
        Ok(message.content.unwrap_or_default())
    }

    async fn complete_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            tools: Some(vec![function_tool(schema)]),
            tool_choice: Some(json!({
                "type": "function",
                "function": { "name": schema.name }
            })),
        };

        let message = self.send(&request).await?;
        structured_payload(message, &schema.name)
    }
}

fn function_tool(schema: &OutputSchema) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": schema.name,
            "description": schema.description,
            "parameters": schema.parameters
        }
    })
}

/// Arguments of the forced tool call, or the message content if the model answered in text
fn structured_payload(message: ResponseMessage, tool_name: &str) -> Result<String, ProviderError> {
    if let Some(call) = message
        .tool_calls
        .into_iter()
        .find(|c| c.function.name == tool_name)
    {
        return Ok(call.function.arguments);
    }

    match message.content {
        Some(content) if !content.trim().is_empty() => {
            debug!("[groq] No '{}' tool call, using message content", tool_name);
            Ok(content)
        }
        _ => Err(ProviderError::InvalidResponse(format!(
            "no '{}' tool call in response",
            tool_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_message(raw: &str) -> ResponseMessage {
        let response: CompletionResponse = serde_json::from_str(raw).unwrap();
        response.choices.into_iter().next().unwrap().message
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = ProviderConfig::default();
        assert!(matches!(
            GroqModel::new(&config, None),
            Err(ProviderError::MissingApiKey)
        ));
        assert!(matches!(
            GroqModel::new(&config, Some("  ".to_string())),
            Err(ProviderError::MissingApiKey)
        ));
        assert!(GroqModel::new(&config, Some("gsk_test".to_string())).is_ok());
    }

    #[test]
    fn test_structured_payload_prefers_tool_call() {
        let message = parse_message(
            r#"{"choices": [{"message": {"role": "assistant", "content": null,
                "tool_calls": [{"id": "call_1", "type": "function",
                "function": {"name": "SectionPlan", "arguments": "{\"sections\": []}"}}]}}]}"#,
        );
        assert_eq!(
            structured_payload(message, "SectionPlan").unwrap(),
            r#"{"sections": []}"#
        );
    }

    #[test]
    fn test_structured_payload_falls_back_to_content() {
        let message = parse_message(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"sections\": []}"}}]}"#,
        );
        assert_eq!(
            structured_payload(message, "SectionPlan").unwrap(),
            r#"{"sections": []}"#
        );
    }

    #[test]
    fn test_structured_payload_without_anything_fails() {
        let message = parse_message(r#"{"choices": [{"message": {"content": ""}}]}"#);
        assert!(matches!(
            structured_payload(message, "SectionPlan"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_request_serialization_omits_unset_fields() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: "gemma2-9b-it",
            messages: &messages,
            temperature: None,
            tools: None,
            tool_choice: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert!(value.get("temperature").is_none());
        assert!(value.get("tools").is_none());
    }
}
