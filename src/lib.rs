//! Pipo Coach - Feedback-generation engine for recorded speech practice sessions
//!
//! The crate turns structured session metrics and a transcript into coaching
//! artifacts through a deterministic pipeline: session normalization → prompt
//! construction → generative completion → response extraction, with
//! rule-based fallback generation whenever the completion path fails.
//!
//! ## Modules
//!
//! - **Normalizer**: Collapse stored session records into metric summaries
//! - **Prompt / Client / Extract**: The generative completion path
//! - **Fallback**: Deterministic threshold-rule substitutes for every artifact
//! - **Pipeline**: Orchestration with the recover-or-surface error policy
//! - **Articles**: Static encouragement-article corpus for daily delivery

pub mod articles;
pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use client::{CompletionProvider, GenerationClient, GenerationConfig};
pub use error::CoachError;
pub use normalizer::SessionNormalizer;
pub use pipeline::CoachEngine;
pub use types::{
    CardKind, FeedbackCard, FollowUpQuestion, NarrativeNote, SessionRecord, SessionSummary,
    TargetLevel,
};

// Article exports
pub use articles::{daily_article_draft, pick_unused_article, Article, DailyArticleDraft};

/// Crate version embedded in diagnostic output
pub const COACH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for diagnostic output
pub const PRODUCER_NAME: &str = "pipo-coach";
