use std::sync::Arc;

use rfq_compliance::application::ports::{
    ClientConstructor, ClientNamespace, Export, LlmClient, LlmClientError,
};
use rfq_compliance::application::services::{ClientResolver, LookupStrategy, ResolveError};

fn constructor(name: &str) -> ClientConstructor {
    ClientConstructor::new(name, |_| {
        Err::<Arc<dyn LlmClient>, _>(LlmClientError::InitializationFailed(
            "not used".to_string(),
        ))
    })
}

#[test]
fn given_named_export_when_resolving_then_returns_it() {
    let gemini = constructor("GoogleGenerativeAI");
    let namespace = ClientNamespace::new().with_constructor("GoogleGenerativeAI", gemini.clone());

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, gemini);
}

#[test]
fn given_callable_namespace_when_resolving_then_returns_namespace_itself() {
    let gemini = constructor("module");
    let namespace = ClientNamespace::callable(gemini.clone());

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, gemini);
}

#[test]
fn given_constructor_nested_under_default_when_resolving_then_returns_same_constructor() {
    let gemini = constructor("GoogleGenerativeAI");
    let namespace = ClientNamespace::new().with_namespace(
        "default",
        ClientNamespace::new().with_constructor("GoogleGenerativeAI", gemini.clone()),
    );

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, gemini);
}

#[test]
fn given_callable_default_when_resolving_then_returns_default() {
    let gemini = constructor("default");
    let namespace = ClientNamespace::new().with_constructor("default", gemini.clone());

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, gemini);
}

#[test]
fn given_only_alias_when_resolving_then_returns_alias() {
    let gemini = constructor("GenerativeAI");
    let namespace = ClientNamespace::new()
        .with_export("VERSION", Export::Value("1.0.0".to_string()))
        .with_constructor("GenerativeAI", gemini.clone());

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, gemini);
}

#[test]
fn given_named_export_and_callable_default_when_resolving_then_named_export_wins() {
    let named = constructor("GoogleGenerativeAI");
    let fallback = constructor("default");
    let namespace = ClientNamespace::new()
        .with_constructor("default", fallback.clone())
        .with_constructor("GoogleGenerativeAI", named.clone());

    let resolved = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap();

    assert_eq!(resolved, named);
    assert_ne!(resolved, fallback);
}

#[test]
fn given_no_usable_export_when_resolving_then_error_lists_available_keys() {
    let namespace = ClientNamespace::new()
        .with_export("VERSION", Export::Value("1.0.0".to_string()))
        .with_export("HarmCategory", Export::Value("enum".to_string()));

    let err = ClientResolver::google_generative_ai()
        .resolve(&namespace)
        .unwrap_err();

    let ResolveError::NoUsableExport { available } = &err;
    assert_eq!(available, &vec!["HarmCategory".to_string(), "VERSION".to_string()]);
    assert!(err.to_string().contains("HarmCategory, VERSION"));
}

#[test]
fn given_google_resolver_when_listing_strategies_then_order_is_fixed() {
    let resolver = ClientResolver::google_generative_ai();

    assert_eq!(
        resolver.strategies(),
        &[
            LookupStrategy::NamedExport("GoogleGenerativeAI".to_string()),
            LookupStrategy::SelfCallable,
            LookupStrategy::NestedNamed {
                parent: "default".to_string(),
                name: "GoogleGenerativeAI".to_string(),
            },
            LookupStrategy::DefaultCallable,
            LookupStrategy::Aliases(vec![
                "GoogleGenAI".to_string(),
                "GenerativeAI".to_string(),
            ]),
        ]
    );
}
