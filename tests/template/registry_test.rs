//! Integration tests for registry extension.

use sqlshim::template::{ops, RegistryError, ResolveError, Template, TemplateRegistry};
use sqlshim::{Dialect, DialectTag};

fn snapshot(registry: &TemplateRegistry, tags: &[DialectTag]) -> Vec<(String, String, String)> {
    let mut out = Vec::new();
    for operation in registry.operations() {
        let arity = registry.arity(operation).unwrap();
        let operands: Vec<String> = (0..arity).map(|i| format!("x{i}")).collect();
        for tag in tags {
            let sql = registry.resolve(operation, tag, &operands).unwrap();
            out.push((operation.to_string(), tag.to_string(), sql));
        }
    }
    out
}

#[test]
fn test_adding_a_dialect_leaves_existing_pairs_unchanged() {
    let mut registry = TemplateRegistry::builtin();
    let existing: Vec<DialectTag> = [
        Dialect::BigQuery,
        Dialect::Postgres,
        Dialect::SqlServer,
        Dialect::Snowflake,
    ]
    .iter()
    .map(Dialect::tag)
    .chain([DialectTag::new("unknown-dialect")])
    .collect();
    let before = snapshot(&registry, &existing);

    registry
        .register(
            ops::CENTS_TO_DOLLARS,
            Dialect::DuckDb,
            Template::new(1, |o| format!("round({} / 100.0, 2)", o[0])),
        )
        .unwrap();

    assert_eq!(snapshot(&registry, &existing), before);
    assert_eq!(
        registry
            .resolve(ops::CENTS_TO_DOLLARS, &Dialect::DuckDb.tag(), &["price"])
            .unwrap(),
        "round(price / 100.0, 2)"
    );
}

#[test]
fn test_existing_template_cannot_be_replaced() {
    let mut registry = TemplateRegistry::builtin();
    let err = registry
        .register(
            ops::CENTS_TO_DOLLARS,
            "postgres",
            Template::new(1, |o| format!("{} / 100", o[0])),
        )
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::DuplicateTemplate {
            operation: "cents-to-dollars".to_string(),
            dialect: "postgres".to_string(),
        }
    );
    assert_eq!(
        registry
            .resolve(ops::CENTS_TO_DOLLARS, &Dialect::Postgres.tag(), &["price"])
            .unwrap(),
        "(price::numeric(16,2) / 100)"
    );
}

#[test]
fn test_builtin_operations_cannot_be_redeclared() {
    let mut registry = TemplateRegistry::builtin();
    assert_eq!(
        registry.declare(ops::HASH, Template::new(1, |o| o[0].to_string())),
        Err(RegistryError::DuplicateOperation("hash".to_string()))
    );
}

#[test]
fn test_custom_operation_with_fallback() {
    let mut registry = TemplateRegistry::new();
    registry
        .declare(
            "split-part",
            Template::new(3, |o| format!("SPLIT_PART({}, {}, {})", o[0], o[1], o[2])),
        )
        .unwrap();
    registry
        .register(
            "split-part",
            "bigquery",
            Template::new(3, |o| format!("SPLIT({}, {})[SAFE_OFFSET({} - 1)]", o[0], o[1], o[2])),
        )
        .unwrap();

    assert_eq!(
        registry
            .resolve("split-part", &DialectTag::new("bigquery"), &["email", "'@'", "2"])
            .unwrap(),
        "SPLIT(email, '@')[SAFE_OFFSET(2 - 1)]"
    );
    assert_eq!(
        registry
            .resolve("split-part", &DialectTag::new("snowflake"), &["email", "'@'", "2"])
            .unwrap(),
        "SPLIT_PART(email, '@', 2)"
    );
    assert_eq!(
        registry.resolve("split-part", &DialectTag::new("snowflake"), &["email"]),
        Err(ResolveError::Arity {
            operation: "split-part".to_string(),
            expected: 3,
            actual: 1,
        })
    );
    assert_eq!(registry.operations(), vec!["split-part"]);
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = TemplateRegistry::shared();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let column = format!("amount_{i}");
                registry
                    .resolve(ops::CENTS_TO_DOLLARS, &Dialect::Postgres.tag(), &[column.as_str()])
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("(amount_{i}::numeric(16,2) / 100)")
        );
    }
}
