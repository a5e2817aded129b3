//! OpenAI-compatible chat completions client
//!
//! Works against OpenRouter or the OpenAI API proper, selected by key
//! prefix or an explicit base URL.

use crate::*;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, trace};

pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    api_base: String,
    default_model: String,
}

impl OpenRouterProvider {
    pub fn new(
        api_key: impl Into<String>,
        api_base: Option<String>,
        default_model: Option<String>,
    ) -> Self {
        let api_key = api_key.into();
        let is_openrouter = api_key.starts_with("sk-or-")
            || api_base
                .as_ref()
                .map(|b| b.contains("openrouter"))
                .unwrap_or(false);

        let api_base = api_base.unwrap_or_else(|| {
            if is_openrouter {
                "https://openrouter.ai/api/v1".to_string()
            } else {
                "https://api.openai.com/v1".to_string()
            }
        });

        let default_model = default_model.unwrap_or_else(|| {
            if is_openrouter {
                "openai/gpt-4o".to_string()
            } else {
                "gpt-4o".to_string()
            }
        });

        Self {
            client: Client::new(),
            api_key,
            api_base,
            default_model,
        }
    }

    fn build_request(&self, params: &ChatParams) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = params
            .messages
            .iter()
            .map(|m| json!({ "role": &m.role, "content": &m.content }))
            .collect();

        let mut body = json!({
            "model": params.model,
            "messages": messages,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });

        if params.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<ChatResponse> {
        let choice = json["choices"]
            .get(0)
            .ok_or(ProviderError::InvalidResponse)?;
        let message = &choice["message"];
        let content = message["content"].as_str().map(|s| s.to_string());
        let finish_reason = choice["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let usage = if let Some(usage) = json["usage"].as_object() {
            Usage {
                prompt_tokens: usage
                    .get("prompt_tokens")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as u32,
                completion_tokens: usage
                    .get("completion_tokens")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as u32,
                total_tokens: usage
                    .get("total_tokens")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as u32,
            }
        } else {
            Usage::default()
        };

        Ok(ChatResponse {
            content,
            finish_reason,
            usage,
        })
    }
}

#[async_trait::async_trait]
impl Provider for OpenRouterProvider {
    async fn chat(&self, params: ChatParams) -> Result<ChatResponse> {
        trace!("chat completion against {}", self.api_base);

        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request(&params);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let json: serde_json::Value = response.json().await?;

        if !status.is_success() {
            let error = json["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }
            return Err(ProviderError::Api(error));
        }

        debug!(
            "chat completion finished: {}",
            json["choices"][0]["finish_reason"]
                .as_str()
                .unwrap_or("unknown")
        );

        self.parse_response(json)
    }

    fn default_model(&self) -> String {
        self.default_model.clone()
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_with_openrouter_key() {
        let provider = OpenRouterProvider::new("sk-or-test123", None, None);
        assert_eq!(provider.api_base, "https://openrouter.ai/api/v1");
        assert_eq!(provider.default_model, "openai/gpt-4o");
    }

    #[test]
    fn test_new_with_openai_key() {
        let provider = OpenRouterProvider::new("sk-openai123", None, None);
        assert_eq!(provider.api_base, "https://api.openai.com/v1");
        assert_eq!(provider.default_model, "gpt-4o");
    }

    #[test]
    fn test_new_with_custom_base_and_model() {
        let provider = OpenRouterProvider::new(
            "sk-test",
            Some("https://api.custom.com/v1".to_string()),
            Some("custom/model".to_string()),
        );
        assert_eq!(provider.api_base, "https://api.custom.com/v1");
        assert_eq!(provider.default_model(), "custom/model");
    }

    #[test]
    fn test_is_configured() {
        assert!(OpenRouterProvider::new("some-key", None, None).is_configured());
        assert!(!OpenRouterProvider::new("", None, None).is_configured());
    }

    #[test]
    fn test_build_request_basic() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let params = ChatParams {
            model: "gpt-4o".to_string(),
            messages: vec![Message::user("Hello")],
            max_tokens: 1024,
            temperature: 0.5,
            json_mode: false,
        };

        let request = provider.build_request(&params);

        assert_eq!(request["model"], "gpt-4o");
        assert_eq!(request["max_tokens"], 1024);
        assert_eq!(request["temperature"], 0.5);
        assert!(request.get("response_format").is_none());

        let messages = request["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Hello");
    }

    #[test]
    fn test_build_request_json_mode() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let params = ChatParams {
            model: "gpt-4o".to_string(),
            messages: vec![Message::user("Hello")],
            json_mode: true,
            ..ChatParams::default()
        };

        let request = provider.build_request(&params);
        assert_eq!(request["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_build_request_message_order() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let params = ChatParams {
            model: "gpt-4o".to_string(),
            messages: vec![
                Message::system("You are helpful"),
                Message::user("Hello"),
                Message::assistant("{\"step\":\"plan\",\"content\":\"think\"}"),
            ],
            ..ChatParams::default()
        };

        let request = provider.build_request(&params);
        let messages = request["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
    }

    #[test]
    fn test_parse_response_simple() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let response_json = json!({
            "choices": [{
                "message": {
                    "content": "{\"step\":\"output\",\"content\":\"done\"}",
                    "role": "assistant"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        });

        let response = provider.parse_response(response_json).unwrap();

        assert_eq!(
            response.content,
            Some("{\"step\":\"output\",\"content\":\"done\"}".to_string())
        );
        assert_eq!(response.finish_reason, "stop");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[test]
    fn test_parse_response_missing_usage() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let response_json = json!({
            "choices": [{
                "message": { "content": "Hello" },
                "finish_reason": "stop"
            }]
        });

        let response = provider.parse_response(response_json).unwrap();
        assert_eq!(response.usage.prompt_tokens, 0);
        assert_eq!(response.usage.total_tokens, 0);
    }

    #[test]
    fn test_parse_response_empty_choices() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let result = provider.parse_response(json!({ "choices": [], "usage": {} }));
        assert!(matches!(result, Err(ProviderError::InvalidResponse)));
    }

    #[test]
    fn test_parse_response_missing_choices() {
        let provider = OpenRouterProvider::new("sk-test", None, None);
        let result = provider.parse_response(json!({ "usage": {} }));
        assert!(matches!(result, Err(ProviderError::InvalidResponse)));
    }
}
