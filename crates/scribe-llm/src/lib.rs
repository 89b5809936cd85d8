//! Completion backend boundary for Scribe.
//!
//! Scribe never talks to a language model directly. It hands a system
//! instruction, a user instruction, and a [`SchemaDescriptor`] to a
//! [`Completion`] implementation and gets back the raw response text.
//! Parsing that text into a typed result is the caller's job.
//!
//! # Providers
//!
//! - [`OpenAiCompletion`] -- Chat Completions API with JSON-schema output
//! - [`ScriptedCompletion`] -- in-process responder for tests and offline runs

pub mod completion;
pub mod config;
pub mod error;
pub mod openai;
pub mod schema;
pub mod scripted;

pub use completion::Completion;
pub use config::LlmConfig;
pub use error::{LlmError, LlmResult};
pub use openai::OpenAiCompletion;
pub use schema::{AnalysisShape, SchemaDescriptor};
pub use scripted::ScriptedCompletion;
