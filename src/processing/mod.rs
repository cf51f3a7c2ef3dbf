//! Extraction and matching core

pub mod experience;
pub mod extractors;
pub mod job_structurer;
pub mod pipeline;
pub mod similarity;
pub mod skill_matcher;

pub use pipeline::{CandidateProfile, MatchReport, MatchResponse, MatchResult, MatchingPipeline};
