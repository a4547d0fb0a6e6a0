use crate::value::PropertyValue;

/// A node with its wire types already shed: a label set plus an ordered
/// property mapping.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub labels: Vec<String>,
    pub properties: Vec<(String, PropertyValue)>,
}

impl NodeRecord {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone)]
pub struct ConnectedEntity {
    pub relationship: String,
    pub node: NodeRecord,
}

/// One-hop traversal result: the customer plus every directly connected
/// node, in whatever order the store returned them.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    pub customer: NodeRecord,
    pub connections: Vec<ConnectedEntity>,
}

const PROPERTY_HEADER: &str = "Property";
const VALUE_HEADER: &str = "Value";

/// Render a neighborhood as pipe-delimited two-column tables, customer
/// section first, one section per connected entity, blank line between
/// sections.
pub fn render_profile(neighborhood: &Neighborhood) -> String {
    let mut sections = vec![render_customer(&neighborhood.customer)];
    for connection in &neighborhood.connections {
        sections.push(render_connected(connection));
    }
    sections.join("\n\n")
}

fn render_customer(customer: &NodeRecord) -> String {
    let mut rows: Vec<(String, String)> = customer
        .properties
        .iter()
        .map(|(key, value)| (key.clone(), value.render()))
        .collect();
    rows.push(("Labels".to_string(), customer.labels.join(", ")));
    render_table("--- Customer Profile ---", &rows)
}

fn render_connected(entity: &ConnectedEntity) -> String {
    let node = &entity.node;
    let entity_type = if node.labels.is_empty() {
        "N/A".to_string()
    } else {
        node.labels.join(", ")
    };

    // Best-effort display identifier: prefer `name`, fall back to `type`.
    let mut display = node
        .property("name")
        .or_else(|| node.property("type"))
        .map(PropertyValue::render)
        .unwrap_or_else(|| "N/A".to_string());
    if let Some(id) = node.property("id") {
        display.push_str(&format!(" (ID: {})", id.render()));
    }

    let mut rows = vec![
        ("Relationship".to_string(), entity.relationship.clone()),
        ("Entity Type".to_string(), entity_type.clone()),
        ("Entity Name/ID".to_string(), display),
    ];
    for (key, value) in &node.properties {
        if !matches!(key.as_str(), "name" | "id" | "type") {
            rows.push((key.clone(), value.render()));
        }
    }

    render_table(&format!("--- Connected Entity: {entity_type} ---"), &rows)
}

fn render_table(heading: &str, rows: &[(String, String)]) -> String {
    let rows: Vec<(String, &str)> = rows
        .iter()
        .map(|(key, value)| (title_case(key), value.as_str()))
        .collect();

    // Column widths come from the data itself, clamped to the header labels
    // so every cell in a table is exactly as wide as its header cell.
    let key_width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .chain([PROPERTY_HEADER.len()])
        .max()
        .unwrap_or(PROPERTY_HEADER.len());
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .chain([VALUE_HEADER.len()])
        .max()
        .unwrap_or(VALUE_HEADER.len());

    let mut lines = vec![heading.to_string()];
    lines.push(format!(
        "| {PROPERTY_HEADER:<key_width$} | {VALUE_HEADER:<value_width$} |"
    ));
    lines.push(format!(
        "| {} | {} |",
        "-".repeat(key_width),
        "-".repeat(value_width)
    ));
    for (key, value) in &rows {
        lines.push(format!("| {key:<key_width$} | {value:<value_width$} |"));
    }
    lines.join("\n")
}

/// `monthly_income_total` -> `Monthly Income Total`. An alphabetic character
/// is uppercased when not preceded by another alphabetic character and
/// lowercased otherwise, so `Entity Name/ID` -> `Entity Name/Id`.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_alpha = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_neighborhood() -> Neighborhood {
        Neighborhood {
            customer: NodeRecord {
                labels: vec!["Customer".to_string()],
                properties: vec![
                    ("age".to_string(), PropertyValue::Int(32)),
                    ("name".to_string(), PropertyValue::Text("Priya".to_string())),
                ],
            },
            connections: vec![ConnectedEntity {
                relationship: "HAS_ACCOUNT".to_string(),
                node: NodeRecord {
                    labels: vec!["FinancialAccount".to_string()],
                    properties: vec![
                        ("id".to_string(), PropertyValue::Text("ACC01".to_string())),
                        (
                            "type".to_string(),
                            PropertyValue::Text("Checking".to_string()),
                        ),
                        ("balance".to_string(), PropertyValue::Float(25000.0)),
                    ],
                },
            }],
        }
    }

    #[test]
    fn test_customer_section_rows() {
        let output = render_profile(&sample_neighborhood());
        assert!(output.starts_with("--- Customer Profile ---"));
        assert!(output.contains("| Age"));
        assert!(output.contains("| Name"));
        assert!(output.contains("| Labels"));
        assert!(output.contains("| Customer"));
    }

    #[test]
    fn test_connected_entity_section() {
        let output = render_profile(&sample_neighborhood());
        assert!(output.contains("--- Connected Entity: FinancialAccount ---"));
        assert!(output.contains("HAS_ACCOUNT"));
        assert!(output.contains("| Balance"));
        assert!(output.contains("| 25000.0"));
        // The display identifier prefers `type` when there is no name.
        assert!(output.contains("Checking (ID: ACC01)"));
    }

    #[test]
    fn test_sections_joined_with_blank_line() {
        let output = render_profile(&sample_neighborhood());
        assert!(output.contains("|\n\n--- Connected Entity:"));
    }

    #[test]
    fn test_cell_widths_match_header() {
        let output = render_profile(&sample_neighborhood());
        let mut header_widths: Option<Vec<usize>> = None;

        for line in output.lines() {
            if !line.starts_with('|') {
                // New section; the next table row is its header.
                header_widths = None;
                continue;
            }
            let widths: Vec<usize> = line
                .trim_matches('|')
                .split('|')
                .map(|cell| cell.chars().count())
                .collect();
            match &header_widths {
                None => header_widths = Some(widths),
                Some(expected) => assert_eq!(&widths, expected, "misaligned row: {line}"),
            }
        }
    }

    #[test]
    fn test_excluded_keys_not_repeated() {
        let output = render_profile(&sample_neighborhood());
        let entity_section = output
            .split("--- Connected Entity:")
            .nth(1)
            .expect("entity section");
        // `name`/`id`/`type` only surface through the synthetic rows.
        assert!(!entity_section.contains("| Id "));
        assert!(!entity_section.contains("| Type "));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("monthly_income_total"), "Monthly Income Total");
        assert_eq!(title_case("age"), "Age");
        assert_eq!(title_case("Entity Name/ID"), "Entity Name/Id");
        assert_eq!(title_case("Labels"), "Labels");
    }

    #[test]
    fn test_empty_label_set_renders_na() {
        let neighborhood = Neighborhood {
            customer: NodeRecord {
                labels: vec!["Customer".to_string()],
                properties: vec![("name".to_string(), PropertyValue::Text("X".to_string()))],
            },
            connections: vec![ConnectedEntity {
                relationship: "RELATED_TO".to_string(),
                node: NodeRecord {
                    labels: vec![],
                    properties: vec![],
                },
            }],
        };
        let output = render_profile(&neighborhood);
        assert!(output.contains("--- Connected Entity: N/A ---"));
    }
}
