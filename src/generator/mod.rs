pub mod context;
pub mod layout;
pub mod media;
pub mod normalizer;
pub mod parser;
pub mod prompts;
pub mod templates;
pub mod workflow;
