mod builder;
pub use builder::SchemaBuilder;

use serde_json::Value;

/// Schema is a representation of a JSON Schema that describes the structure
/// the model should return.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }

    /// Names listed under `required`, in declaration order.
    pub fn required_fields(&self) -> Vec<&str> {
        self.schema["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema)
    }
}

/// SchemaType trait defines a type that can be converted to a JSON Schema
pub trait SchemaType {
    /// Generate a JSON Schema representation of this type
    fn schema() -> Schema;
}
