use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use extract::{CustomerIdentifier, ExtractedQuery, IdentifierExtractor, PatternExtractor};
use profile::ProfileRetriever;
use retrieval::DocumentRetriever;

use crate::llm::GenerationClient;
use crate::prompt;

const NO_IDENTIFIER_PROFILE: &str =
    "No specific user identifier found in query to fetch profile.";

#[derive(Debug, Clone, Serialize)]
pub struct Answered {
    pub answer: String,
    pub trace: AnswerTrace,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerTrace {
    pub identifier: Option<String>,
    pub passages_retrieved: usize,
    pub context_size: usize,
}

/// The full per-request pipeline: identify the customer, fetch their graph
/// neighborhood, retrieve matching documents, fuse everything into one
/// generation request. All entities built here live for one request only.
pub struct AnswerEngine {
    extractor: PatternExtractor,
    profiles: ProfileRetriever,
    documents: DocumentRetriever,
    generator: GenerationClient,
}

impl AnswerEngine {
    pub fn new(
        profiles: ProfileRetriever,
        documents: DocumentRetriever,
        generator: GenerationClient,
    ) -> Self {
        Self {
            extractor: PatternExtractor::new(),
            profiles,
            documents,
            generator,
        }
    }

    pub async fn answer(&self, raw_query: &str) -> Result<Answered> {
        // Step 1: Identify the customer and clean the question
        let ExtractedQuery {
            identifier,
            question,
        } = self.extractor.extract(raw_query);
        info!(id = ?identifier.id, name = ?identifier.name, "extracted customer identifier");

        // Step 2: Profile lookup and document retrieval are independent of
        // each other; both must complete before generation. A dead graph
        // degrades to sentinel text, a dead index fails the request.
        let (profile_text, passages) = tokio::join!(
            self.fetch_profile(&identifier),
            self.documents.retrieve(&question),
        );
        let passages = passages.context("Failed to retrieve documents")?;

        // Step 3: Fuse into a single generation request
        let context = prompt::join_passages(&passages);
        let system = prompt::system_prompt(&profile_text);
        let user = prompt::user_prompt(&context, &question);

        // Step 4: Generate
        let answer = self
            .generator
            .generate(&system, &user)
            .await
            .context("Generation request failed")?;

        Ok(Answered {
            answer,
            trace: AnswerTrace {
                identifier: identifier.id.or(identifier.name),
                passages_retrieved: passages.len(),
                context_size: context.len(),
            },
        })
    }

    async fn fetch_profile(&self, identifier: &CustomerIdentifier) -> String {
        if identifier.id.is_none() && identifier.name.is_none() {
            return NO_IDENTIFIER_PROFILE.to_string();
        }
        self.profiles
            .fetch_profile(identifier.id.as_deref(), identifier.name.as_deref())
            .await
    }
}
