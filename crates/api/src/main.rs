mod config;
mod context;
mod error;
mod event;
mod metrics;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::context::AppContext;
use crate::error::RequestError;

#[derive(Serialize)]
struct HealthResponse {
    knowledge_graph: String,
    vector_index: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Required configuration aborts startup when missing; the graph
    // credential group degrades instead.
    let settings = Settings::from_env()?;
    let context = AppContext::initialize(&settings).await?;

    // Build router
    let app = Router::new()
        .route("/assist", post(assist))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(context);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Server listening on http://localhost:3000");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn assist(
    State(context): State<Arc<AppContext>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, RequestError> {
    // Reject malformed payloads before touching any collaborator.
    let raw_query = event::extract_query(&payload)?;

    let started = Instant::now();
    let result = context.engine.answer(&raw_query).await;
    context
        .metrics
        .record_request(result.is_ok(), started.elapsed());

    match result {
        Ok(answered) => {
            info!(
                identifier = ?answered.trace.identifier,
                passages = answered.trace.passages_retrieved,
                context_size = answered.trace.context_size,
                "answered query"
            );
            Ok(Json(json!({ "response": answered.answer })))
        }
        Err(err) => Err(RequestError::Internal(format!("{err:#}"))),
    }
}

async fn health_check(State(context): State<Arc<AppContext>>) -> Json<HealthResponse> {
    let knowledge_graph = match &context.graph {
        Some(graph) => match graph.run(neo4rs::query("RETURN 1")).await {
            Ok(_) => "ok".to_string(),
            Err(err) => format!("error: {err}"),
        },
        None => "not connected".to_string(),
    };

    let vector_index = match context.vector_index.describe_index_stats().await {
        Ok(()) => "ok".to_string(),
        Err(err) => format!("error: {err}"),
    };

    Json(HealthResponse {
        knowledge_graph,
        vector_index,
    })
}

async fn get_stats(State(context): State<Arc<AppContext>>) -> Json<metrics::MetricsSnapshot> {
    Json(context.metrics.snapshot())
}
