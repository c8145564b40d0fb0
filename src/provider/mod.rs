mod groq;

pub use groq::GroqModel;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Shape the model must answer in when structured output is requested
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl OutputSchema {
    /// Build a self-contained schema for `T` (subschemas inlined, no `$schema` header)
    pub fn of<T: JsonSchema>(name: &str, description: &str) -> Self {
        let generator = SchemaSettings::draft07()
            .with(|s| s.inline_subschemas = true)
            .into_generator();
        let root = generator.into_root_schema_for::<T>();

        let mut parameters = serde_json::to_value(root).unwrap_or_default();
        if let Some(obj) = parameters.as_object_mut() {
            obj.remove("$schema");
            obj.remove("title");
        }

        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Free-text completion
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;

    /// Completion constrained to `schema`; returns the raw JSON the model produced
    async fn complete_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<String, ProviderError>;
}

/// Create the chat model for the configured provider
pub fn create_model(
    config: &ProviderConfig,
    api_key: Option<String>,
) -> Result<Arc<dyn ChatModel>, ProviderError> {
    Ok(Arc::new(GroqModel::new(config, api_key)?))
}

#[cfg(test)]
pub mod testing {
    //! Scripted stand-in for a chat model

    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    pub struct ScriptedModel {
        /// Raw structured output for the planner, or an error message
        pub plan: Option<Result<String, String>>,
        /// Section name -> generated text
        pub replies: HashMap<String, String>,
        /// Section name -> artificial latency
        pub delays: HashMap<String, Duration>,
        /// Section name whose completion fails
        pub fail_on: Option<String>,
        pub structured_calls: AtomicUsize,
        pub completion_calls: AtomicUsize,
    }

    impl ScriptedModel {
        pub fn with_plan(raw: &str) -> Self {
            Self {
                plan: Some(Ok(raw.to_string())),
                ..Default::default()
            }
        }

        pub fn reply(mut self, section: &str, text: &str) -> Self {
            self.replies.insert(section.to_string(), text.to_string());
            self
        }

        pub fn delay(mut self, section: &str, delay: Duration) -> Self {
            self.delays.insert(section.to_string(), delay);
            self
        }

        pub fn failing_on(mut self, section: &str) -> Self {
            self.fail_on = Some(section.to_string());
            self
        }

        pub fn completions(&self) -> usize {
            self.completion_calls.load(Ordering::SeqCst)
        }

        fn section_of(messages: &[ChatMessage]) -> String {
            let user = messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.as_str())
                .unwrap_or("");
            user.strip_prefix("Here is the section name: ")
                .and_then(|rest| rest.split(" and description: ").next())
                .unwrap_or(user)
                .to_string()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
            self.completion_calls.fetch_add(1, Ordering::SeqCst);
            let section = Self::section_of(messages);

            if let Some(delay) = self.delays.get(&section) {
                tokio::time::sleep(*delay).await;
            }

            if self.fail_on.as_deref() == Some(section.as_str()) {
                return Err(ProviderError::Api {
                    status: 500,
                    message: format!("scripted failure for {}", section),
                });
            }

            Ok(self
                .replies
                .get(&section)
                .cloned()
                .unwrap_or_else(|| format!("## {}\n\nGenerated text.", section)))
        }

        async fn complete_structured(
            &self,
            _messages: &[ChatMessage],
            _schema: &OutputSchema,
        ) -> Result<String, ProviderError> {
            self.structured_calls.fetch_add(1, Ordering::SeqCst);
            match &self.plan {
                Some(Ok(raw)) => Ok(raw.clone()),
                Some(Err(message)) => Err(ProviderError::Request(message.clone())),
                None => Err(ProviderError::InvalidResponse("no plan scripted".to_string())),
            }
        }
    }
}
