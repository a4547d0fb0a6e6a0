use serde_json::Value;

use crate::error::RequestError;

/// Pull the raw query string out of an invocation payload. Three shapes are
/// accepted: a model-invocation request body
/// (`requestBody.content."application/json".properties.query`), a bare
/// `inputText`, and a proxy-integration `body` carrying a JSON string with a
/// `query` field.
pub fn extract_query(payload: &Value) -> Result<String, RequestError> {
    let raw = if let Some(properties) =
        payload.pointer("/requestBody/content/application~1json/properties")
    {
        query_from_properties(properties)?
    } else if let Some(Value::String(input)) = payload.get("inputText") {
        input.clone()
    } else if let Some(Value::String(body)) = payload.get("body") {
        let parsed: Value =
            serde_json::from_str(body).map_err(|err| RequestError::Internal(err.to_string()))?;
        parsed
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    } else {
        return Err(RequestError::MissingQuery);
    };

    if raw.is_empty() {
        return Err(RequestError::EmptyQuery);
    }
    Ok(raw)
}

fn query_from_properties(properties: &Value) -> Result<String, RequestError> {
    match properties.get("query") {
        // The field may arrive as a string-attribute object, a raw string,
        // or a string that itself encodes JSON with a `query` field.
        Some(Value::Object(attribute)) => Ok(attribute
            .get("S")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()),
        Some(Value::String(text)) => Ok(match serde_json::from_str::<Value>(text) {
            Ok(parsed) => parsed
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or(text.as_str())
                .to_string(),
            Err(_) => text.clone(),
        }),
        Some(other) => Ok(other.to_string()),
        None => Err(RequestError::MissingQuery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_text_shape() {
        let payload = json!({ "inputText": "Priya (P001) : What accounts does she have?" });
        assert_eq!(
            extract_query(&payload).unwrap(),
            "Priya (P001) : What accounts does she have?"
        );
    }

    #[test]
    fn test_proxy_body_shape() {
        let payload = json!({ "body": "{\"query\": \"Priya (P001) : What accounts does she have?\"}" });
        assert_eq!(
            extract_query(&payload).unwrap(),
            "Priya (P001) : What accounts does she have?"
        );
    }

    #[test]
    fn test_request_body_shape_with_plain_string() {
        let payload = json!({
            "requestBody": {
                "content": {
                    "application/json": {
                        "properties": { "query": "What is the savings rate?" }
                    }
                }
            }
        });
        assert_eq!(extract_query(&payload).unwrap(), "What is the savings rate?");
    }

    #[test]
    fn test_request_body_shape_with_json_string() {
        let payload = json!({
            "requestBody": {
                "content": {
                    "application/json": {
                        "properties": { "query": "{\"query\": \"inner question\"}" }
                    }
                }
            }
        });
        assert_eq!(extract_query(&payload).unwrap(), "inner question");
    }

    #[test]
    fn test_request_body_shape_with_string_attribute() {
        let payload = json!({
            "requestBody": {
                "content": {
                    "application/json": {
                        "properties": { "query": { "S": "attribute question" } }
                    }
                }
            }
        });
        assert_eq!(extract_query(&payload).unwrap(), "attribute question");
    }

    #[test]
    fn test_unrecognized_shape() {
        let payload = json!({ "unexpected": true });
        assert_eq!(extract_query(&payload), Err(RequestError::MissingQuery));
    }

    #[test]
    fn test_empty_query_rejected() {
        let payload = json!({ "inputText": "" });
        assert_eq!(extract_query(&payload), Err(RequestError::EmptyQuery));
    }

    #[test]
    fn test_body_without_query_field_is_empty() {
        let payload = json!({ "body": "{\"other\": 1}" });
        assert_eq!(extract_query(&payload), Err(RequestError::EmptyQuery));
    }
}
