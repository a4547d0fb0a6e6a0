use std::sync::Arc;

use anyhow::Result;
use neo4rs::Graph;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use answer::{AnswerEngine, GenerationClient};
use profile::ProfileRetriever;
use retrieval::{DocumentRetriever, EmbeddingClient, VectorIndexClient};

use crate::config::Settings;
use crate::metrics::Metrics;

static CONTEXT: OnceCell<Arc<AppContext>> = OnceCell::const_new();

/// All long-lived resource handles, built once and shared for the process
/// lifetime. `initialize` is idempotent and safe under concurrent first use.
pub struct AppContext {
    pub engine: AnswerEngine,
    pub graph: Option<Graph>,
    pub vector_index: VectorIndexClient,
    pub metrics: Arc<Metrics>,
}

impl AppContext {
    pub async fn initialize(settings: &Settings) -> Result<Arc<AppContext>> {
        CONTEXT
            .get_or_try_init(|| Self::build(settings))
            .await
            .map(Arc::clone)
    }

    async fn build(settings: &Settings) -> Result<Arc<AppContext>> {
        let graph = connect_graph(settings).await;

        let vector_index = VectorIndexClient::new(
            settings.index_host.clone(),
            settings.vector_api_key.clone(),
        );
        let embeddings = EmbeddingClient::new(
            settings.model_api_base.clone(),
            settings.embedding_model_id.clone(),
        );
        let documents = DocumentRetriever::new(embeddings, vector_index.clone(), settings.top_k);
        info!(
            index = %settings.index_name,
            top_k = settings.top_k,
            "document retriever initialized"
        );

        let generator = GenerationClient::new(
            settings.model_api_base.clone(),
            settings.generation_model_id.clone(),
        );
        let profiles = ProfileRetriever::new(graph.clone());

        Ok(Arc::new(AppContext {
            engine: AnswerEngine::new(profiles, documents, generator),
            graph,
            vector_index,
            metrics: Metrics::new(),
        }))
    }
}

/// Missing or bad graph credentials are not fatal: the pipeline runs without
/// the knowledge graph and the profile retriever degrades to sentinel text.
async fn connect_graph(settings: &Settings) -> Option<Graph> {
    let Some(graph_settings) = &settings.graph else {
        warn!("Neo4j credentials not fully set, running without the knowledge graph");
        return None;
    };

    let graph = match Graph::new(
        graph_settings.uri.as_str(),
        graph_settings.username.as_str(),
        graph_settings.password.as_str(),
    )
    .await
    {
        Ok(graph) => graph,
        Err(err) => {
            warn!(error = %err, "failed to create knowledge graph driver, running without it");
            return None;
        }
    };

    match graph.run(neo4rs::query("RETURN 1")).await {
        Ok(_) => {
            info!(uri = %graph_settings.uri, "connected to knowledge graph");
            Some(graph)
        }
        Err(err) => {
            warn!(error = %err, "knowledge graph unreachable, running without it");
            None
        }
    }
}
