mod client_namespace;
mod file_loader;
mod llm_client;
mod staging_store;

pub use client_namespace::{ClientConstructor, ClientNamespace, ClientOptions, Export};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use staging_store::{StagingStore, StagingStoreError};
