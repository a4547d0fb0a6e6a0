use anyhow::{Result, anyhow};

const DEFAULT_EMBEDDING_MODEL: &str = "amazon.titan-embed-text-v2:0";
const DEFAULT_TOP_K: usize = 3;

/// Process configuration, read once at startup. Required settings fail fast
/// with the offending variable named; the graph credential group is the one
/// exception and degrades to running without the knowledge graph.
#[derive(Debug, Clone)]
pub struct Settings {
    pub vector_api_key: String,
    pub vector_environment: String,
    pub index_name: String,
    pub index_host: String,
    pub embedding_model_id: String,
    pub generation_model_id: String,
    pub model_api_base: String,
    pub top_k: usize,
    pub graph: Option<GraphSettings>,
}

#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| -> Result<String> {
            get(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("{name} not set as an environment variable"))
        };

        let region = require("AWS_REGION_1")?;
        let model_api_base = get("MODEL_API_BASE")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("https://bedrock-runtime.{region}.amazonaws.com"));

        let graph = match (
            get("NEO4J_URI"),
            get("NEO4J_USERNAME"),
            get("NEO4J_PASSWORD"),
        ) {
            (Some(uri), Some(username), Some(password))
                if !uri.is_empty() && !username.is_empty() && !password.is_empty() =>
            {
                Some(GraphSettings {
                    uri,
                    username,
                    password,
                })
            }
            _ => None,
        };

        let top_k = match get("RETRIEVAL_TOP_K") {
            Some(raw) if !raw.is_empty() => raw
                .parse()
                .map_err(|_| anyhow!("RETRIEVAL_TOP_K is not a valid integer: {raw}"))?,
            _ => DEFAULT_TOP_K,
        };

        Ok(Self {
            vector_api_key: require("PINECONE_API_KEY")?,
            vector_environment: require("PINECONE_ENVIRONMENT")?,
            index_name: require("INDEX_NAME")?,
            index_host: require("PINECONE_INDEX_HOST")?,
            embedding_model_id: get("EMBEDDING_MODEL_ID")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            generation_model_id: require("GENERATION_MODEL_ID")?,
            model_api_base,
            top_k,
            graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("PINECONE_API_KEY", "key"),
            ("PINECONE_ENVIRONMENT", "us-east-1"),
            ("INDEX_NAME", "smart-saving-unstruct"),
            ("PINECONE_INDEX_HOST", "index.example.pinecone.io"),
            ("GENERATION_MODEL_ID", "anthropic.claude-3-haiku"),
            ("AWS_REGION_1", "us-east-1"),
        ])
    }

    fn settings_from(vars: HashMap<&'static str, &'static str>) -> Result<Settings> {
        Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_minimal_configuration() {
        let settings = settings_from(base_vars()).unwrap();
        assert_eq!(settings.embedding_model_id, "amazon.titan-embed-text-v2:0");
        assert_eq!(settings.top_k, 3);
        assert_eq!(
            settings.model_api_base,
            "https://bedrock-runtime.us-east-1.amazonaws.com"
        );
        assert!(settings.graph.is_none());
    }

    #[test]
    fn test_missing_required_variable_names_it() {
        let mut vars = base_vars();
        vars.remove("PINECONE_API_KEY");
        let err = settings_from(vars).unwrap_err();
        assert!(err.to_string().contains("PINECONE_API_KEY"));
    }

    #[test]
    fn test_incomplete_graph_credentials_degrade() {
        let mut vars = base_vars();
        vars.insert("NEO4J_URI", "bolt://localhost:7687");
        vars.insert("NEO4J_USERNAME", "neo4j");
        // No password: the group is treated as absent, not an error.
        let settings = settings_from(vars).unwrap();
        assert!(settings.graph.is_none());
    }

    #[test]
    fn test_complete_graph_credentials() {
        let mut vars = base_vars();
        vars.insert("NEO4J_URI", "bolt://localhost:7687");
        vars.insert("NEO4J_USERNAME", "neo4j");
        vars.insert("NEO4J_PASSWORD", "secret");
        let settings = settings_from(vars).unwrap();
        assert!(settings.graph.is_some());
    }

    #[test]
    fn test_top_k_override() {
        let mut vars = base_vars();
        vars.insert("RETRIEVAL_TOP_K", "5");
        let settings = settings_from(vars).unwrap();
        assert_eq!(settings.top_k, 5);
    }
}
