pub mod anthropic_llm;
pub mod openai_llm;

pub use anthropic_llm::AnthropicStoryAdapter;
pub use openai_llm::OpenAiStoryAdapter;
