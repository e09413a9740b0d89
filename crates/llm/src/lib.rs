//! PitchMatch LLM Integration
//!
//! DeepSeek chat-completions client and proposal writer

mod client;
mod llm_trait;
mod prompts;
mod types;
mod writer;

pub use client::DeepSeekClient;
pub use llm_trait::TextGenerator;
pub use prompts::{proposal_prompt, SYSTEM_PROMPT};
pub use types::{ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse, EMPTY_RESPONSE};
pub use writer::{placeholder_for, ProposalWriter, MISSING_KEY_PLACEHOLDER};
