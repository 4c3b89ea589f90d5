//! The two calls Flora makes: photo analysis and advice.

mod advisor;
mod analyzer;
pub mod progress;

pub use advisor::{
    Advice, DEFAULT_ADVICE_MODEL, ERROR_REPLY, PlantAdvisor, UNPROCESSABLE_REPLY,
    system_instruction,
};
pub use analyzer::{ANALYSIS_INSTRUCTION, DEFAULT_ANALYSIS_MODEL, PlantAnalyzer};
pub use progress::{ANALYSIS_STATUSES, DEFAULT_STATUS_INTERVAL, ProgressReporter};
