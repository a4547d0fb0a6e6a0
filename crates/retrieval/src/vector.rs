use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Metadata key holding the passage text in the index.
const TEXT_KEY: &str = "original_content";

/// One passage from the document index. Order is retrieval-rank order; the
/// score is carried for logging and never used to reorder downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub text: String,
    pub score: f32,
}

/// REST client for the hosted vector index.
#[derive(Clone)]
pub struct VectorIndexClient {
    index_host: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<IndexMatch>,
}

#[derive(Deserialize)]
struct IndexMatch {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl VectorIndexClient {
    pub fn new(index_host: String, api_key: String) -> Self {
        Self {
            index_host,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Similarity search, most relevant first.
    pub async fn search(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedPassage>> {
        let url = format!("https://{}/query", self.index_host);

        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send search request to vector index")?;

        if !response.status().is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Vector index search failed: {detail}");
        }

        let result: QueryResponse = response
            .json()
            .await
            .context("Failed to parse vector index response")?;

        Ok(to_passages(result.matches))
    }

    /// Reachability probe used by the health endpoint.
    pub async fn describe_index_stats(&self) -> Result<()> {
        let url = format!("https://{}/describe_index_stats", self.index_host);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .context("Failed to reach vector index")?;

        if !response.status().is_success() {
            anyhow::bail!("Vector index returned status {}", response.status());
        }
        Ok(())
    }
}

/// Matches without passage text carry nothing usable for the prompt and are
/// dropped; rank order of the rest is preserved.
fn to_passages(matches: Vec<IndexMatch>) -> Vec<RetrievedPassage> {
    matches
        .into_iter()
        .filter_map(|m| {
            m.metadata
                .get(TEXT_KEY)
                .and_then(|value| value.as_str())
                .map(|text| RetrievedPassage {
                    text: text.to_string(),
                    score: m.score,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(json: &str) -> QueryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_passages_keep_rank_order() {
        let response = response_from(
            r#"{"matches": [
                {"id": "a", "score": 0.92, "metadata": {"original_content": "first"}},
                {"id": "b", "score": 0.81, "metadata": {"original_content": "second"}},
                {"id": "c", "score": 0.75, "metadata": {"original_content": "third"}}
            ]}"#,
        );
        let passages = to_passages(response.matches);
        let texts: Vec<&str> = passages.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_match_without_text_is_dropped() {
        let response = response_from(
            r#"{"matches": [
                {"id": "a", "score": 0.9, "metadata": {"source": "news"}},
                {"id": "b", "score": 0.8, "metadata": {"original_content": "kept"}}
            ]}"#,
        );
        let passages = to_passages(response.matches);
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "kept");
    }

    #[test]
    fn test_empty_result_set() {
        let response = response_from(r#"{"matches": []}"#);
        assert!(to_passages(response.matches).is_empty());
    }
}
