//! Resume qualifier library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{QualifierError, Result};
pub use processing::{MatchReport, MatchResponse, MatchingPipeline};
