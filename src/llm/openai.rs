use super::stream::read_stream_to_string;
use super::{ChatClient, ChatMessage, CompletionRequest};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::io::BufReader;

/// Request body for the Chat Completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// OpenAI-compatible implementation of ChatClient.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(OpenAiClient {
            client,
            api_key,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chat_url(&self) -> String {
        if self.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.api_base_url)
        }
    }

    fn send(&self, request: &CompletionRequest<'_>) -> Result<Response> {
        let body = ChatRequest {
            model: request.model,
            messages: request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: request.stream,
        };

        log::trace!(
            "Chat request body: {}",
            serde_json::to_string(&body).unwrap_or_default()
        );

        let resp = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .context("failed to send request to the completion API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "completion API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        Ok(resp)
    }
}

fn parse_stream_line(line: &str) -> Result<Option<String>> {
    let line = line.trim_start();
    if !line.starts_with("data:") {
        return Ok(None);
    }

    let data = line.trim_start_matches("data:").trim();
    if data == "[DONE]" {
        return Ok(None);
    }

    let chunk: StreamResponse =
        serde_json::from_str(data).context("failed to parse streaming chunk")?;
    let content = chunk
        .choices
        .first()
        .and_then(|c| c.delta.content.clone());

    Ok(content)
}

impl ChatClient for OpenAiClient {
    fn complete(
        &self,
        request: &CompletionRequest<'_>,
        on_progress: &mut dyn FnMut(&str),
    ) -> Result<String> {
        if request.stream {
            log::info!("Streaming model {:?}", request.model);
            let resp = self.send(request)?;
            let reader = BufReader::new(resp);
            return read_stream_to_string(reader, parse_stream_line, on_progress);
        }

        log::info!("Calling model {:?}", request.model);

        let resp = self.send(request)?;
        let chat_resp: ChatResponse = resp.json().context("failed to parse completion response")?;

        if let Some(usage) = &chat_resp.usage {
            log::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let content = chat_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no choices returned from the completion API"))?
            .message
            .content
            .unwrap_or_default();

        on_progress(&content);
        Ok(content)
    }
}
