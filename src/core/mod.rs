pub mod batch;
pub mod config;
pub mod pair_filter;
pub mod predictor;
pub mod rbo;
pub mod top_match;

pub use batch::{BatchScorer, ScoreMatrix};
pub use config::{Config, ScoringParams};
pub use predictor::{HostPredictor, Prediction};
pub use top_match::TopMatch;
