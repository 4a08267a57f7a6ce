//! The seam between the session and the external text-generation capability.

use crate::config::Config;
use crate::contract::ChatReply;
use crate::error::CoachError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::watch;

/// How often the readiness probe re-checks the endpoint until it first succeeds.
const READY_PROBE_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

// The `Coach` trait is the contract for anything that can answer a prompt.
// The session depends on this abstraction rather than a concrete client, so
// unit tests can drive it with `mockall`'s `MockCoach` instead of a live
// endpoint. `#[cfg_attr(test, automock)]` generates the mock only when
// compiling for tests.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Coach {
    /// Sends one prompt and resolves with the reply, or a typed failure.
    async fn chat(&self, prompt: &str) -> Result<ChatReply, CoachError>;

    /// Whether the capability has come up yet. Once true it stays true for
    /// the life of the session.
    fn is_ready(&self) -> bool;
}

/// HTTP client for an OpenAI-style chat completions endpoint.
pub struct CoachClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    ready: watch::Receiver<bool>,
}

impl CoachClient {
    /// Creates the client and spawns a background probe that polls the
    /// endpoint until it is first observed available, then resolves the
    /// readiness signal exactly once. Must be called within a tokio runtime.
    pub fn connect(config: &Config) -> Self {
        let client = Client::new();
        let (ready_tx, ready_rx) = watch::channel(false);

        let probe_client = client.clone();
        let probe_url = format!("{}/models", config.base_url);
        let probe_key = config.api_key.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(READY_PROBE_INTERVAL);
            loop {
                tick.tick().await;
                match probe_client
                    .get(&probe_url)
                    .bearer_auth(&probe_key)
                    .send()
                    .await
                {
                    Ok(resp) if resp.status().is_success() => {
                        tracing::info!("coach endpoint is ready");
                        let _ = ready_tx.send(true);
                        break;
                    }
                    Ok(resp) => {
                        tracing::debug!(status = %resp.status(), "coach endpoint not ready yet");
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "coach endpoint not reachable yet");
                    }
                }
            }
        });

        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.chat_model.clone(),
            base_url: config.base_url.clone(),
            ready: ready_rx,
        }
    }

    /// Resolves once the endpoint has been observed available.
    pub async fn wait_ready(&self) {
        let mut ready = self.ready.clone();
        // The sender only drops after publishing true, so an error here still
        // means the last observed value is final.
        let _ = ready.wait_for(|up| *up).await;
    }
}

#[async_trait]
impl Coach for CoachClient {
    async fn chat(&self, prompt: &str) -> Result<ChatReply, CoachError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .json::<ChatCompletion>()
            .await?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CoachError::MalformedResponse("reply carried no choices".to_string()))?;

        Ok(ChatReply::Text(content))
    }

    fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }
}
