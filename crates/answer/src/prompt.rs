use retrieval::RetrievedPassage;

/// System block of the fusion prompt. The grounding rules here are
/// prompt-level contracts; the model is trusted to follow them and nothing
/// downstream verifies compliance.
const SYSTEM_TEMPLATE: &str = "You are a helpful senior risk analyst for JPMorgan Chase.
Based on the following context and the detailed user profile information (if provided),
please answer the question accurately and concisely.

Pay close attention to any user-specific identifiers (like user ID) and any 'Unstructured Data'
notes in the user profile, as these often contain critical insights.

If the answer is not available in the provided information, state that you cannot answer.
Summarize their profile information and any relevant context to provide a comprehensive answer.
Do not make up information. Focus on providing relevant details from the context and user profile.

User Profile from Knowledge Graph:
";

pub fn system_prompt(profile_text: &str) -> String {
    format!("{SYSTEM_TEMPLATE}{profile_text}")
}

pub fn user_prompt(context: &str, question: &str) -> String {
    format!("Context:\n{context}\n\nQuestion: {question}\n\nAnswer:")
}

/// Passages concatenated with a blank line, retrieval order preserved.
pub fn join_passages(passages: &[RetrievedPassage]) -> String {
    passages
        .iter()
        .map(|passage| passage.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
