//! # brandforge-inference
//!
//! Text-generation backend abstraction for brandforge.
//!
//! This crate provides:
//! - OpenAI-compatible chat-completions backend (default)
//! - Task system prompts and prompt-context builders
//! - Scripted mock backend for tests (feature `mock`)
//!
//! The generation collaborator is a black box: callers parse its output as
//! JSON and re-validate through the brandforge-core normalizers on every
//! call. Transient failures are never retried here; the orchestration
//! layer re-invokes exactly once on avoid-word violations and otherwise
//! surfaces a generation error.

pub mod openai;
pub mod prompts;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use brandforge_core::*;

pub use openai::{OpenAIBackend, OpenAIConfig};
pub use prompts::{
    brand_core_context, brand_core_system_prompt, campaign_brief_context,
    campaign_brief_system_prompt, caption_pack_context, caption_pack_system_prompt,
    palette_context, palette_system_prompt, render_context, voice_context, voice_system_prompt,
    KitFacts,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
