pub mod engine;
pub mod llm;
pub mod prompt;

pub use engine::{AnswerEngine, AnswerTrace, Answered};
pub use llm::GenerationClient;
