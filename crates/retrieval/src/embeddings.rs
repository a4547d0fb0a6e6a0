use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Client for the hosted text-embedding model.
#[derive(Clone)]
pub struct EmbeddingClient {
    base_url: String,
    model_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingRequest {
    input_text: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(base_url: String, model_id: String) -> Self {
        Self {
            base_url,
            model_id,
            client: reqwest::Client::new(),
        }
    }

    /// Generate an embedding for the given text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/model/{}/invoke", self.base_url, self.model_id);

        let request = EmbeddingRequest {
            input_text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send embedding request")?;

        if !response.status().is_success() {
            anyhow::bail!("Embedding request failed: {}", response.status());
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse embedding response")?;

        Ok(embedding_response.embedding)
    }
}
