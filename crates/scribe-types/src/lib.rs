//! Foundation types for Scribe.
//!
//! This crate provides the identifier and payload types shared by every
//! other Scribe crate.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Opaque, randomly generated key into the result store
//! - [`TranscriptAnalysis`]: Structured analysis produced for one transcript
//! - [`AnalysisResponse`]: Wire shape `{ id, summary, next_actions }`
//! - [`BatchTranscriptRequest`]: Multi-transcript request body

pub mod analysis;
pub mod object;

pub use analysis::{AnalysisResponse, BatchTranscriptRequest, TranscriptAnalysis};
pub use object::ObjectId;
