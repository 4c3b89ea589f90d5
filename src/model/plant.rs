use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{FloraError, Result};
use crate::model::Instructor;
use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// Cultivation requirements for one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCareGuide {
    pub watering: String,
    pub sunlight: String,
    pub temperature: String,
    pub humidity: String,
    pub soil: String,
    pub fertilizer: String,
}

impl PlantCareGuide {
    /// Field name and value pairs, in schema order.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("watering", &self.watering),
            ("sunlight", &self.sunlight),
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("soil", &self.soil),
            ("fertilizer", &self.fertilizer),
        ]
    }
}

impl SchemaType for PlantCareGuide {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .string_property("watering", "Detailed watering instructions")
            .string_property("sunlight", "Light requirement details")
            .string_property("temperature", "Ideal temperature range")
            .string_property("humidity", "Humidity needs")
            .string_property("soil", "Soil type recommendation")
            .string_property("fertilizer", "Fertilization schedule and type")
            .build()
    }
}

/// Identification and care record produced by one successful image analysis.
///
/// Serialized with camelCase keys (`scientificName`, `careGuide`,
/// `commonIssues`), the same shape the analysis schema asks the model for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantInfo {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub care_guide: PlantCareGuide,
    pub toxicity: String,
    pub common_issues: Vec<String>,
}

impl SchemaType for PlantInfo {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .string_property("name", "Common name of the plant")
            .string_property("scientificName", "Botanical/Scientific name")
            .string_property("description", "A brief, engaging overview of the plant")
            .property("careGuide", PlantCareGuide::schema().schema, true)
            .string_property("toxicity", "Toxicity to pets or humans")
            .property(
                "commonIssues",
                json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of common problems or pests"
                }),
                true,
            )
            .build()
    }
}

impl Instructor for PlantInfo {
    fn validate(&self) -> Result<()> {
        let identity = [
            ("name", self.name.as_str()),
            ("scientificName", self.scientific_name.as_str()),
            ("description", self.description.as_str()),
            ("toxicity", self.toxicity.as_str()),
        ];
        let care = self.care_guide.entries();

        for (field, value) in identity.into_iter().chain(care) {
            if value.trim().is_empty() {
                return Err(FloraError::SchemaViolation(format!(
                    "field `{}` is blank",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monstera_json() -> serde_json::Value {
        json!({
            "name": "Monstera",
            "scientificName": "Monstera deliciosa",
            "description": "A tropical climber with split leaves.",
            "careGuide": {
                "watering": "Water when the top 5 cm of soil are dry.",
                "sunlight": "Bright, indirect light.",
                "temperature": "18-27°C",
                "humidity": "Above 60%",
                "soil": "Chunky, well-draining aroid mix.",
                "fertilizer": "Monthly balanced liquid feed in spring and summer."
            },
            "toxicity": "Toxic to cats and dogs if ingested.",
            "commonIssues": ["Yellowing leaves", "Spider mites"]
        })
    }

    #[test]
    fn test_plant_info_round_trips_camel_case() {
        let plant: PlantInfo = serde_json::from_value(monstera_json()).unwrap();
        assert_eq!(plant.scientific_name, "Monstera deliciosa");
        assert_eq!(plant.care_guide.humidity, "Above 60%");
        assert_eq!(plant.common_issues.len(), 2);
        assert_eq!(serde_json::to_value(&plant).unwrap(), monstera_json());
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = PlantInfo::schema();
        assert_eq!(
            schema.required_fields(),
            vec![
                "name",
                "scientificName",
                "description",
                "careGuide",
                "toxicity",
                "commonIssues"
            ]
        );

        let json = schema.to_json();
        assert_eq!(json["properties"]["commonIssues"]["type"], "array");
        assert_eq!(json["properties"]["commonIssues"]["items"]["type"], "string");
        let care_required = json["properties"]["careGuide"]["required"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(care_required, 6);
    }

    #[test]
    fn test_missing_care_field_is_schema_violation() {
        let mut value = monstera_json();
        value["careGuide"].as_object_mut().unwrap().remove("soil");
        let err = PlantInfo::from_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, FloraError::SchemaViolation(_)));
    }

    #[test]
    fn test_blank_name_is_schema_violation() {
        let mut value = monstera_json();
        value["name"] = json!("   ");
        let err = PlantInfo::from_response(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            FloraError::SchemaViolation("field `name` is blank".to_string())
        );
    }

    #[test]
    fn test_empty_common_issues_is_accepted() {
        let mut value = monstera_json();
        value["commonIssues"] = json!([]);
        let plant = PlantInfo::from_response(&value.to_string()).unwrap();
        assert!(plant.common_issues.is_empty());
    }
}
