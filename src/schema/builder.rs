use serde_json::{Map, Value, json};

use super::Schema;

/// SchemaBuilder helps construct JSON Schema incrementally.
///
/// Properties and required names keep the order they were declared in. The
/// declaration order is also emitted as `propertyOrdering`, which Gemini uses
/// to order the fields of its structured output.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema_type: String,
    title: Option<String>,
    description: Option<String>,
    properties: Vec<(String, Value)>,
    required: Vec<String>,
    items: Option<Value>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::new()
    }

    pub fn array(items: Value) -> Self {
        Self {
            schema_type: "array".to_string(),
            items: Some(items),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property. Re-adding a name replaces the earlier schema in place.
    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = property_schema,
            None => self.properties.push((name.clone(), property_schema)),
        }
        if required && !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Shorthand for a required string property with a description.
    pub fn string_property(self, name: impl Into<String>, description: &str) -> Self {
        self.property(
            name,
            json!({ "type": "string", "description": description }),
            true,
        )
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": self.schema_type
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if let Some(items) = self.items {
            schema["items"] = items;
        }

        if !self.properties.is_empty() {
            let ordering: Vec<&str> = self.properties.iter().map(|(n, _)| n.as_str()).collect();
            schema["propertyOrdering"] = json!(ordering);

            let mut properties = Map::new();
            for (name, value) in self.properties {
                properties.insert(name, value);
            }
            schema["properties"] = Value::Object(properties);

            if !self.required.is_empty() {
                schema["required"] = json!(self.required);
            }
        }

        Schema::new(schema)
    }
}
