pub mod file_store;
pub mod gemini_llm;

pub use file_store::FileStore;
pub use gemini_llm::GeminiMatchAdapter;
