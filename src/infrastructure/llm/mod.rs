mod gemini_client;
mod sdk_namespace;

pub use gemini_client::{DEFAULT_BASE_URL, GeminiClient};
pub use sdk_namespace::sdk_namespace;
