pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod nlp;
pub mod server;

pub use analysis::{analyze, AnalysisRequest, AnalysisResponse, Entity, SentimentLabel, SentimentResult};
pub use config::Settings;
pub use error::ApiError;
pub use nlp::Pipeline;
