//! Portal inspector: best-effort AI explanations of capability bridges.
//!
//! The client speaks to an OpenAI-compatible chat-completions endpoint and
//! never raises toward the caller: every transport, HTTP, or decode
//! failure degrades to a fixed apology string.

pub mod client;

pub use client::{ExplanationClient, InspectorConfig, InspectorError};
