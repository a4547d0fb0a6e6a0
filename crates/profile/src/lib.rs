pub mod format;
pub mod retriever;
pub mod value;

pub use format::{ConnectedEntity, Neighborhood, NodeRecord, render_profile};
pub use retriever::ProfileRetriever;
pub use value::PropertyValue;
