//! Enrichment collaborator.
//!
//! Workers talk to the analysis step through the [`Analyzer`] trait;
//! [`LlmAnalyzer`] is the production implementation calling an
//! OpenAI-compatible chat-completions endpoint with a structured output
//! schema. Every failure mode surfaces as an analysis error so the worker
//! can substitute the fallback payload.

pub mod client;
pub mod config;
pub mod prompts;

pub use client::{AnalysisOutcome, Analyzer, LlmAnalyzer};
pub use config::AnalysisConfig;
