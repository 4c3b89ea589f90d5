//! Identify a plant photo and ask follow-up questions.
//!
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example identify_plant -- monstera.jpg "How often should I water?"
//! ```

use flora::logging::{LogLevel, init_logging};
use flora::{GeminiClient, MediaFile, PlantSession};
use std::path::Path;
use std::sync::Arc;

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Warn);

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: identify_plant <photo> [question...]");
        std::process::exit(2);
    };
    let path = Path::new(&path);

    let bytes = tokio::fs::read(path).await?;
    let photo = MediaFile::from_bytes(&bytes, mime_type_for(path));

    let session = PlantSession::new(Arc::new(GeminiClient::from_env()?));
    let reporter = |status: &str| println!("... {status}");

    let plant = match session.identify_with_progress(&photo, &reporter).await {
        Ok(plant) => plant,
        Err(e) => {
            tracing::warn!(kind = ?e.kind(), error = %e, "identification failed");
            println!("Sorry, I couldn't identify this plant. Please try a clearer photo.");
            return Ok(());
        }
    };

    println!("\n{} ({})", plant.name, plant.scientific_name);
    println!("{}\n", plant.description);
    for (field, value) in plant.care_guide.entries() {
        println!("  {field:<12} {value}");
    }
    println!("\nToxicity: {}", plant.toxicity);
    for issue in &plant.common_issues {
        println!("  - {issue}");
    }

    for message in session.messages().await {
        println!("\n[{}] {}", message.role.as_str(), message.text);
    }

    for question in args {
        let reply = session.ask(&question).await?;
        println!("\n[user] {question}\n[{}] {}", reply.role.as_str(), reply.text);
    }

    Ok(())
}
