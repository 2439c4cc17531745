use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{LlmClient, LlmClientError};

type ClientFactory =
    dyn Fn(&ClientOptions) -> Result<Arc<dyn LlmClient>, LlmClientError> + Send + Sync;

/// Everything a provider needs to build its client.
#[derive(Clone)]
pub struct ClientOptions {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub temperature: f32,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// A handle able to build a model client. Two handles are equal when they
/// share the same factory.
#[derive(Clone)]
pub struct ClientConstructor {
    name: String,
    factory: Arc<ClientFactory>,
}

impl ClientConstructor {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ClientOptions) -> Result<Arc<dyn LlmClient>, LlmClientError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn construct(&self, options: &ClientOptions) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        (self.factory)(options)
    }
}

impl PartialEq for ClientConstructor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.factory, &other.factory)
    }
}

impl fmt::Debug for ClientConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientConstructor").field(&self.name).finish()
    }
}

/// A single entry of a [`ClientNamespace`].
#[derive(Debug, Clone)]
pub enum Export {
    Constructor(ClientConstructor),
    Namespace(ClientNamespace),
    Value(String),
}

impl Export {
    /// A constructor, or a nested namespace that is itself callable.
    pub fn as_constructor(&self) -> Option<&ClientConstructor> {
        match self {
            Export::Constructor(constructor) => Some(constructor),
            Export::Namespace(namespace) => namespace.as_constructor(),
            Export::Value(_) => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&ClientNamespace> {
        match self {
            Export::Namespace(namespace) => Some(namespace),
            _ => None,
        }
    }
}

/// Key-value view over a provider package whose layout is not known up front.
#[derive(Debug, Clone, Default)]
pub struct ClientNamespace {
    callable: Option<ClientConstructor>,
    exports: BTreeMap<String, Export>,
}

impl ClientNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A namespace that can be invoked directly as a constructor.
    pub fn callable(constructor: ClientConstructor) -> Self {
        Self {
            callable: Some(constructor),
            exports: BTreeMap::new(),
        }
    }

    pub fn with_export(mut self, name: impl Into<String>, export: Export) -> Self {
        self.exports.insert(name.into(), export);
        self
    }

    pub fn with_constructor(self, name: impl Into<String>, constructor: ClientConstructor) -> Self {
        self.with_export(name, Export::Constructor(constructor))
    }

    pub fn with_namespace(self, name: impl Into<String>, namespace: ClientNamespace) -> Self {
        self.with_export(name, Export::Namespace(namespace))
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    pub fn as_constructor(&self) -> Option<&ClientConstructor> {
        self.callable.as_ref()
    }

    /// Export names in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.exports.keys().cloned().collect()
    }
}
