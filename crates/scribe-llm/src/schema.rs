use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use scribe_types::TranscriptAnalysis;

/// Description of the JSON document a completion must produce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Short identifier sent to the provider (`[a-zA-Z0-9_-]`).
    pub name: String,
    /// JSON Schema of the expected document.
    pub schema: Value,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// A result type that can be requested from a completion backend.
pub trait AnalysisShape {
    fn schema() -> SchemaDescriptor;
}

impl AnalysisShape for TranscriptAnalysis {
    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::new(
            "transcript_analysis",
            json!({
                "type": "object",
                "properties": {
                    "summary": { "type": "string" },
                    "next_actions": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["summary", "next_actions"],
                "additionalProperties": false
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_schema_requires_both_fields() {
        let shape = TranscriptAnalysis::schema();
        assert_eq!(shape.name, "transcript_analysis");
        assert_eq!(shape.schema["required"], json!(["summary", "next_actions"]));
        assert_eq!(shape.schema["properties"]["next_actions"]["type"], "array");
    }
}
