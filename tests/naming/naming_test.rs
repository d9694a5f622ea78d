//! Integration tests for the schema naming policy.

use sqlshim::naming::{
    resolve_name, NamingContext, NamingError, NamingPolicy, ResourceClassification,
};

fn context(env: &str) -> NamingContext {
    NamingContext::new("analytics").unwrap().with_environment(env)
}

#[test]
fn test_model_without_custom_name_uses_default() {
    let name = resolve_name(ResourceClassification::ModelLike, None, &context("prod"));
    assert_eq!(name, Ok(Some("analytics".to_string())));
}

#[test]
fn test_model_with_custom_name_in_prod_is_prefixed() {
    let name = resolve_name(
        ResourceClassification::ModelLike,
        Some("marketing"),
        &context("prod"),
    );
    assert_eq!(name, Ok(Some("analytics_marketing".to_string())));
}

#[test]
fn test_model_with_custom_name_outside_prod_uses_default() {
    let name = resolve_name(
        ResourceClassification::ModelLike,
        Some("marketing"),
        &context("dev"),
    );
    assert_eq!(name, Ok(Some("analytics".to_string())));
}

#[test]
fn test_model_with_blank_custom_name_uses_default() {
    let name = resolve_name(ResourceClassification::ModelLike, Some("   "), &context("prod"));
    assert_eq!(name, Ok(Some("analytics".to_string())));
}

#[test]
fn test_seed_with_blank_custom_name_is_absent() {
    let name = resolve_name(ResourceClassification::SeedLike, Some("  "), &context("prod"));
    assert_eq!(name, Ok(None));
}

#[test]
fn test_seed_without_custom_name_is_absent() {
    let name = resolve_name(ResourceClassification::SeedLike, None, &context("prod"));
    assert_eq!(name, Ok(None));
}

#[test]
fn test_seed_ignores_environment() {
    for env in ["prod", "dev"] {
        let name = resolve_name(ResourceClassification::SeedLike, Some("raw_data"), &context(env));
        assert_eq!(name, Ok(Some("raw_data".to_string())));
    }
}

#[test]
fn test_blank_default_schema_is_a_configuration_error() {
    let ctx = NamingContext {
        default_schema: "  ".to_string(),
        environment: Some("prod".to_string()),
    };
    for classification in [ResourceClassification::SeedLike, ResourceClassification::ModelLike] {
        let result = resolve_name(classification, Some("marketing"), &ctx);
        assert!(matches!(result, Err(NamingError::Configuration(_))));
    }
}

#[test]
fn test_never_returns_empty_string() {
    let customs = [None, Some(""), Some(" "), Some("x")];
    let classifications = [ResourceClassification::SeedLike, ResourceClassification::ModelLike];
    for env in ["prod", "dev", ""] {
        for classification in classifications {
            for custom in customs {
                let name = resolve_name(classification, custom, &context(env)).unwrap();
                assert_ne!(name.as_deref(), Some(""));
            }
        }
    }
}

#[test]
fn test_policy_from_toml() {
    let policy: NamingPolicy = toml::from_str("production_environment = \"live\"").unwrap();
    let name = policy.resolve(
        ResourceClassification::ModelLike,
        Some("finance"),
        &context("live"),
    );
    assert_eq!(name, Ok(Some("analytics_finance".to_string())));
}
