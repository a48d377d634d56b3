use crate::log_internal;
use anyhow::{anyhow, Result};

/// Client for a hosted OpenAI-compatible chat completion API
pub struct LlmClient {
    http: reqwest::Client,
    chat_url: String,
    /// Bearer token.  Absent keys surface as an auth error on the first
    /// request rather than preventing startup.
    api_key: Option<String>,
    model_name: String,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatRequest {
    /// LLM model name
    model: String,
    /// Chat conversation to continue
    messages: Vec<ChatMessage>,
    /// LLM temperature
    temperature: f32,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ChatMessage {
    role: ChatMessageRole,
    content: String,
}

#[allow(non_camel_case_types)] // Serialized literally; case matters
#[derive(serde::Serialize, serde::Deserialize)]
enum ChatMessageRole {
    system,
    user,
    assistant,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmClient {
    pub fn new(cfg: &crate::config::Llm, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            chat_url: cfg.chat_url.clone(),
            api_key,
            model_name: cfg.model_name.clone(),
            temperature: cfg.temperature,
        }
    }

    /// One chat completion: a system prompt plus the user's message in,
    /// the model's reply text out.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatMessageRole::system,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: ChatMessageRole::user,
                    content: user.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        log_internal!("Sending request to chat endpoint {}... ", self.chat_url);
        let mut builder = self.http.post(&self.chat_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;
        log_internal!("Sending request to chat endpoint {}... done", self.chat_url);

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(anyhow!("Chat endpoint returned no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_to_wire_format() {
        let request = ChatRequest {
            model: "llama3-70b-8192".to_string(),
            messages: vec![
                ChatMessage {
                    role: ChatMessageRole::system,
                    content: "persona".to_string(),
                },
                ChatMessage {
                    role: ChatMessageRole::user,
                    content: "question".to_string(),
                },
            ],
            // Exactly representable in f32, so the serialized JSON number
            // compares cleanly
            temperature: 0.5,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama3-70b-8192");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "persona");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["temperature"], 0.5);
    }

    #[test]
    fn chat_response_parses_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hello there"}}
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices[0].message.content, "hello there");
    }
}
