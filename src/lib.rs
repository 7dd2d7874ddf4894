pub mod bio;
pub mod cli;
pub mod core;
pub mod report;
pub mod utils;

pub use crate::bio::ranked_list::RankedList;
pub use crate::core::{predictor::HostPredictor, rbo::rbo, rbo::weight};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhirboError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Malformed ranked list: {0}")]
    MalformedRankedList(String),

    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    #[error("Worker failure: {0}")]
    WorkerFailure(String),
}

pub type Result<T> = std::result::Result<T, PhirboError>;
