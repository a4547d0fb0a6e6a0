use neo4rs::Node;

/// Closed value type for graph node properties. Everything coming off the
/// wire is normalized into one of these variants at the retriever boundary,
/// so the formatter and anything downstream never see driver types.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl PropertyValue {
    /// Read one property off a node. Typed reads are attempted narrowest
    /// first; an integer must stay an integer rather than widening to float.
    /// Booleans and anything unrepresentable collapse into `Text`.
    pub fn read(node: &Node, key: &str) -> PropertyValue {
        if let Ok(v) = node.get::<i64>(key) {
            return PropertyValue::Int(v);
        }
        if let Ok(v) = node.get::<f64>(key) {
            return PropertyValue::Float(v);
        }
        if let Ok(v) = node.get::<bool>(key) {
            return PropertyValue::Text(v.to_string());
        }
        if let Ok(v) = node.get::<Vec<String>>(key) {
            return PropertyValue::List(v);
        }
        match node.get::<String>(key) {
            Ok(v) => PropertyValue::Text(v),
            Err(_) => PropertyValue::Text("N/A".to_string()),
        }
    }

    /// Render for table output. Lists join with `", "`; whole floats keep one
    /// fractional digit so a balance of 25000 reads as `25000.0`.
    pub fn render(&self) -> String {
        match self {
            PropertyValue::Int(v) => v.to_string(),
            PropertyValue::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 {
                    format!("{v:.1}")
                } else {
                    v.to_string()
                }
            }
            PropertyValue::Text(v) => v.clone(),
            PropertyValue::List(items) => items.join(", "),
        }
    }
}
