//! OpenAI-compatible chat completion client for produce questions.

use agriscan_core::system_prompt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ClientError;
use crate::error::server_error;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const MAX_COMPLETION_TOKENS: u32 = 1024;
pub const FALLBACK_ANSWER: &str = "I'm sorry, I couldn't generate a response.";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Ask the assistant a question, optionally grounded in a context string
    /// from [`agriscan_core::chat_context`].
    pub async fn complete(
        &self,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ClientError> {
        let url = self.endpoint();
        let system = system_prompt(context);
        let request = build_request(&self.model, &system, message);

        info!(url = %url, model = %self.model, "requesting chat completion");
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            let err = server_error(resp).await;
            warn!(error = %err, "chat completion failed");
            return Err(err);
        }

        let body: ChatResponse = resp.json().await?;
        Ok(answer(body))
    }
}

fn build_request<'a>(model: &'a str, system: &'a str, message: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: message,
            },
        ],
        max_completion_tokens: MAX_COMPLETION_TOKENS,
    }
}

fn answer(resp: ChatResponse) -> String {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| FALLBACK_ANSWER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_and_key_handling() {
        let client = ChatClient::new(
            "https://api.openai.com/v1/".into(),
            Some("  ".into()),
            DEFAULT_MODEL.into(),
        );
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert!(client.api_key.is_none());
    }

    #[test]
    fn request_shape() {
        let system = system_prompt(Some("Current produce being discussed: banana. "));
        let json = serde_json::to_value(build_request("gpt-4o-mini", &system, "Is it ripe?")).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_completion_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(
            json["messages"][0]["content"]
                .as_str()
                .unwrap()
                .ends_with("Context: Current produce being discussed: banana. ")
        );
        assert_eq!(json["messages"][1], json!({"role": "user", "content": "Is it ripe?"}));
    }

    #[test]
    fn first_choice_is_the_answer() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Store at room temperature."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(answer(resp), "Store at room temperature.");
    }

    #[test]
    fn empty_answer_falls_back() {
        for body in [
            json!({"choices": []}),
            json!({}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": ""}}]}),
        ] {
            let resp: ChatResponse = serde_json::from_value(body).unwrap();
            assert_eq!(answer(resp), FALLBACK_ANSWER);
        }
    }
}
