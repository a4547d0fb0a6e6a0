use regex::Regex;
use serde::{Deserialize, Serialize};

/// Customer reference pulled out of a raw query. At least one field is
/// populated when extraction succeeds; `id` wins over `name` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerIdentifier {
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuery {
    pub identifier: CustomerIdentifier,
    pub question: String,
}

/// Narrow seam so the regex heuristic can later be swapped for a real parser
/// or a model-based extractor without touching the pipeline.
pub trait IdentifierExtractor {
    fn extract(&self, raw_query: &str) -> ExtractedQuery;
}

/// Capitalized runs that are never customer names.
const NAME_STOPLIST: [&str; 6] = [
    "context",
    "question",
    "answer",
    "jpmorgan chase",
    "bedrock",
    "model",
];

/// Best-effort extraction of `(name, id, question)` from free text. The
/// precedence order is strict: the explicit `Name (ID) : question` form wins,
/// then a bare ID token anywhere, then a run of capitalized words. Ambiguous
/// free text can yield false positives on the last step.
pub struct PatternExtractor {
    colon_form: Regex,
    bare_id: Regex,
    name_run: Regex,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            colon_form: Regex::new(r"(?i)^\s*([a-z][a-z\s]*?)\s*\(\s*([pc]\d{3,})\s*\)\s*:\s*(.*)")
                .unwrap(),
            bare_id: Regex::new(r"(?i)\b([pc]\d{3,})\b").unwrap(),
            name_run: Regex::new(r"(?:user\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierExtractor for PatternExtractor {
    fn extract(&self, raw_query: &str) -> ExtractedQuery {
        if let Some(caps) = self.colon_form.captures(raw_query) {
            return ExtractedQuery {
                identifier: CustomerIdentifier {
                    name: Some(caps[1].trim().to_string()),
                    id: Some(caps[2].to_uppercase()),
                },
                question: caps[3].trim().to_string(),
            };
        }

        // Leftmost bare ID wins; the question is left untouched.
        if let Some(caps) = self.bare_id.captures(raw_query) {
            return ExtractedQuery {
                identifier: CustomerIdentifier {
                    name: None,
                    id: Some(caps[1].to_uppercase()),
                },
                question: raw_query.to_string(),
            };
        }

        if let Some(caps) = self.name_run.captures(raw_query) {
            let candidate = caps[1].to_string();
            if !NAME_STOPLIST
                .iter()
                .any(|stop| stop.eq_ignore_ascii_case(&candidate))
            {
                return ExtractedQuery {
                    identifier: CustomerIdentifier {
                        name: Some(candidate),
                        id: None,
                    },
                    question: raw_query.to_string(),
                };
            }
        }

        ExtractedQuery {
            identifier: CustomerIdentifier {
                name: None,
                id: None,
            },
            question: raw_query.to_string(),
        }
    }
}
