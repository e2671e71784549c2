pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod recommender;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ProcessFailure, RoadmapError};
pub use generator::context::GeneratorContext;
pub use generator::workflow::{generate_roadmap, launch};
pub use recommender::VideoRecommender;
