use async_trait::async_trait;
use flora::{ContentRequest, FloraError, GenerativeClient, MediaFile, PlantInfo, Result};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued replies in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<ContentRequest>>,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, error: FloraError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ContentRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: &ContentRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FloraError::ApiError("no scripted reply left".to_string())))
    }
}

#[allow(dead_code)]
pub fn plant_json(name: &str, scientific_name: &str) -> Value {
    json!({
        "name": name,
        "scientificName": scientific_name,
        "description": format!("{name} is a popular houseplant."),
        "careGuide": {
            "watering": "Water when the top 2-3 cm of soil feel dry.",
            "sunlight": "Bright, indirect light; avoid harsh afternoon sun.",
            "temperature": "18-27°C, keep away from cold drafts.",
            "humidity": "Prefers 50-60% humidity or higher.",
            "soil": "Chunky, well-draining mix with bark and perlite.",
            "fertilizer": "Balanced liquid fertilizer monthly in spring and summer."
        },
        "toxicity": "Toxic to cats and dogs if ingested.",
        "commonIssues": ["Yellowing leaves from overwatering", "Spider mites", "Brown leaf tips"]
    })
}

#[allow(dead_code)]
pub fn monstera_json() -> Value {
    plant_json("Monstera", "Monstera deliciosa")
}

#[allow(dead_code)]
pub fn monstera() -> PlantInfo {
    serde_json::from_value(monstera_json()).expect("fixture should deserialize")
}

#[allow(dead_code)]
pub fn photo() -> MediaFile {
    MediaFile::from_bytes(b"\xff\xd8\xff\xe0 not really a jpeg", "image/jpeg")
}
