// Job-matching chat assistant: language table, prompt templates and the relay
// that forwards conversations to the completion gateway.
// All completion calls go through llm_client — no direct gateway calls here.

pub mod handlers;
pub mod language;
pub mod prompts;
pub mod relay;
