//! Minimal Gemini `generateContent` client.
//!
//! Only the non-streaming, structured-output subset of the API is modelled:
//! a system instruction, a single user turn, a response schema and an
//! optional thinking budget.

pub mod client;
pub mod models;

pub use client::{GeminiClient, GeminiError};
pub use models::*;
