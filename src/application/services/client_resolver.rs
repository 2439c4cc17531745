use crate::application::ports::{ClientConstructor, ClientNamespace};

pub const GOOGLE_GENERATIVE_AI_EXPORT: &str = "GoogleGenerativeAI";

const DEFAULT_EXPORT: &str = "default";
const GOOGLE_GENERATIVE_AI_ALIASES: [&str; 2] = ["GoogleGenAI", "GenerativeAI"];

/// One way a provider package may expose its client constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `namespace[name]` is a constructor.
    NamedExport(String),
    /// The namespace itself is callable.
    SelfCallable,
    /// `namespace[parent][name]` is a constructor.
    NestedNamed { parent: String, name: String },
    /// `namespace["default"]` is itself callable.
    DefaultCallable,
    /// The first of several alternative names that is a constructor.
    Aliases(Vec<String>),
}

impl LookupStrategy {
    pub fn lookup<'a>(&self, namespace: &'a ClientNamespace) -> Option<&'a ClientConstructor> {
        match self {
            LookupStrategy::NamedExport(name) => {
                namespace.get(name).and_then(|export| export.as_constructor())
            }
            LookupStrategy::SelfCallable => namespace.as_constructor(),
            LookupStrategy::NestedNamed { parent, name } => namespace
                .get(parent)
                .and_then(|export| export.as_namespace())
                .and_then(|nested| nested.get(name))
                .and_then(|export| export.as_constructor()),
            LookupStrategy::DefaultCallable => namespace
                .get(DEFAULT_EXPORT)
                .and_then(|export| export.as_constructor()),
            LookupStrategy::Aliases(names) => names
                .iter()
                .find_map(|name| namespace.get(name).and_then(|export| export.as_constructor())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no usable client constructor found; namespace exports: [{}]", .available.join(", "))]
    NoUsableExport { available: Vec<String> },
}

/// Finds a client constructor in a provider namespace. Strategies are tried in
/// order and the first match wins.
#[derive(Debug, Clone)]
pub struct ClientResolver {
    strategies: Vec<LookupStrategy>,
}

impl ClientResolver {
    pub fn new(strategies: Vec<LookupStrategy>) -> Self {
        Self { strategies }
    }

    pub fn for_export(name: &str, aliases: &[&str]) -> Self {
        Self::new(vec![
            LookupStrategy::NamedExport(name.to_string()),
            LookupStrategy::SelfCallable,
            LookupStrategy::NestedNamed {
                parent: DEFAULT_EXPORT.to_string(),
                name: name.to_string(),
            },
            LookupStrategy::DefaultCallable,
            LookupStrategy::Aliases(aliases.iter().map(|alias| alias.to_string()).collect()),
        ])
    }

    pub fn google_generative_ai() -> Self {
        Self::for_export(GOOGLE_GENERATIVE_AI_EXPORT, &GOOGLE_GENERATIVE_AI_ALIASES)
    }

    pub fn strategies(&self) -> &[LookupStrategy] {
        &self.strategies
    }

    pub fn resolve(&self, namespace: &ClientNamespace) -> Result<ClientConstructor, ResolveError> {
        for strategy in &self.strategies {
            if let Some(constructor) = strategy.lookup(namespace) {
                tracing::debug!(
                    strategy = ?strategy,
                    constructor = constructor.name(),
                    "Resolved model client constructor"
                );
                return Ok(constructor.clone());
            }
        }

        Err(ResolveError::NoUsableExport {
            available: namespace.keys(),
        })
    }
}
