use anyhow::Result;
use log::debug;

use crate::config::Config;
use crate::llm::openai::OpenAiClient;
use crate::llm::ChatClient;

/// Build the chat-completion client from the resolved config.
pub fn build_chat_client(cfg: &Config) -> Result<Box<dyn ChatClient>> {
    debug!(
        "Using OpenAiClient at {} with model: {}",
        cfg.api_base_url, cfg.generation.model
    );

    let client = OpenAiClient::new(cfg.api_key.clone(), &cfg.api_base_url)?;
    Ok(Box::new(client))
}
