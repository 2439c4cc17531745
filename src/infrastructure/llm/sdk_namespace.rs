use std::sync::Arc;

use crate::application::ports::{ClientConstructor, ClientNamespace, Export, LlmClient};
use crate::application::services::GOOGLE_GENERATIVE_AI_EXPORT;

use super::GeminiClient;

/// The provider package as seen by the client resolver. The Gemini
/// constructor is exported both at the top level and under `default`.
pub fn sdk_namespace() -> ClientNamespace {
    let gemini = ClientConstructor::new(GOOGLE_GENERATIVE_AI_EXPORT, |options| {
        let client = GeminiClient::new(options)?;
        Ok(Arc::new(client) as Arc<dyn LlmClient>)
    });

    ClientNamespace::new()
        .with_constructor(GOOGLE_GENERATIVE_AI_EXPORT, gemini.clone())
        .with_namespace(
            "default",
            ClientNamespace::new().with_constructor(GOOGLE_GENERATIVE_AI_EXPORT, gemini),
        )
        .with_export("VERSION", Export::Value(env!("CARGO_PKG_VERSION").to_string()))
}
