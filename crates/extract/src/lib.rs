pub mod identifier;

pub use identifier::{CustomerIdentifier, ExtractedQuery, IdentifierExtractor, PatternExtractor};
