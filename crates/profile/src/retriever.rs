use neo4rs::{Graph, Query};
use tracing::warn;

use crate::format::{ConnectedEntity, Neighborhood, NodeRecord, render_profile};
use crate::value::PropertyValue;

const NOT_CONNECTED: &str =
    "No user profile available from knowledge graph (Neo4j not connected or credentials missing).";
const NO_IDENTIFIER: &str = "No user ID or name provided for Knowledge Graph query.";
const TEMPORARILY_UNAVAILABLE: &str = "Knowledge Graph temporarily unavailable.";

const PROFILE_BY_ID: &str = "MATCH (c:Customer {id: $key})-[r]-(connected) RETURN c, r, connected";
const PROFILE_BY_NAME: &str =
    "MATCH (c:Customer {name: $key})-[r]-(connected) RETURN c, r, connected";

/// Read-only one-hop profile lookups against the knowledge graph. Holds no
/// handle at all when the graph was not configured or reachable at startup;
/// every failure mode degrades to a sentinel string, never an error.
pub struct ProfileRetriever {
    graph: Option<Graph>,
}

impl ProfileRetriever {
    pub fn new(graph: Option<Graph>) -> Self {
        Self { graph }
    }

    /// Fetch and render the customer's one-hop neighborhood. ID-based lookup
    /// takes precedence; name-based lookup only runs when no ID is present.
    /// The result is always prompt-ready text.
    pub async fn fetch_profile(&self, id: Option<&str>, name: Option<&str>) -> String {
        let Some(graph) = &self.graph else {
            warn!("graph store not connected, skipping profile lookup");
            return NOT_CONNECTED.to_string();
        };

        let (query, identifier) = match (id, name) {
            (Some(id), _) => (
                Query::new(PROFILE_BY_ID.to_string()).param("key", id.to_string()),
                id,
            ),
            (None, Some(name)) => (
                Query::new(PROFILE_BY_NAME.to_string()).param("key", name.to_string()),
                name,
            ),
            (None, None) => return NO_IDENTIFIER.to_string(),
        };

        match fetch_neighborhood(graph, query).await {
            Ok(Some(neighborhood)) => render_profile(&neighborhood),
            Ok(None) => not_found(identifier),
            Err(err) => {
                warn!(error = %err, identifier, "graph profile query failed");
                map_graph_error(&err)
            }
        }
    }
}

async fn fetch_neighborhood(
    graph: &Graph,
    query: Query,
) -> Result<Option<Neighborhood>, neo4rs::Error> {
    let mut stream = graph.execute(query).await?;

    let mut customer: Option<NodeRecord> = None;
    let mut connections = Vec::new();

    while let Some(row) = stream.next().await? {
        // Every row repeats the customer node; capture it from the first.
        if customer.is_none() {
            let node: neo4rs::Node = row.get("c").map_err(neo4rs::Error::DeserializationError)?;
            customer = Some(node_record(&node));
        }

        let relation: neo4rs::Relation =
            row.get("r").map_err(neo4rs::Error::DeserializationError)?;
        let connected: neo4rs::Node =
            row.get("connected").map_err(neo4rs::Error::DeserializationError)?;
        connections.push(ConnectedEntity {
            relationship: relation.typ().to_string(),
            node: node_record(&connected),
        });
    }

    Ok(customer.map(|customer| Neighborhood {
        customer,
        connections,
    }))
}

fn node_record(node: &neo4rs::Node) -> NodeRecord {
    NodeRecord {
        labels: node.labels().iter().map(|label| label.to_string()).collect(),
        properties: node
            .keys()
            .into_iter()
            .map(|key| (key.to_string(), PropertyValue::read(node, key)))
            .collect(),
    }
}

fn not_found(identifier: &str) -> String {
    format!("No profile found in Knowledge Graph for identifier: {identifier}.")
}

fn map_graph_error(err: &neo4rs::Error) -> String {
    match err {
        neo4rs::Error::ConnectionError => TEMPORARILY_UNAVAILABLE.to_string(),
        other => format!("Error fetching profile from Knowledge Graph: {other}"),
    }
}
