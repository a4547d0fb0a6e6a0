use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Decoding configuration is fixed at deployment, never per request.
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 0.999;
const TOP_K: u32 = 250;

/// Client for the hosted generation model.
#[derive(Clone)]
pub struct GenerationClient {
    base_url: String,
    model_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerationRequest {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    stop_sequences: Vec<String>,
    system: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct GenerationResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl GenerationClient {
    pub fn new(base_url: String, model_id: String) -> Self {
        Self {
            base_url,
            model_id,
            client: reqwest::Client::new(),
        }
    }

    /// Invoke the model and return the decoded text unmodified.
    pub async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/model/{}/invoke", self.base_url, self.model_id);

        let request = GenerationRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            stop_sequences: Vec::new(),
            system: system.to_string(),
            messages: vec![Message {
                role: "user",
                content: user.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send generation request")?;

        if !response.status().is_success() {
            anyhow::bail!("Generation request failed: {}", response.status());
        }

        let generation: GenerationResponse = response
            .json()
            .await
            .context("Failed to parse generation response")?;

        let text: Vec<String> = generation
            .content
            .into_iter()
            .map(|block| block.text)
            .collect();
        Ok(text.concat())
    }
}
