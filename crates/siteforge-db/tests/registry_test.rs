//! Integration tests for the template and client registries using
//! in-memory SurrealDB.

use serde_json::json;
use siteforge_core::models::client::ClientRegistration;
use siteforge_core::models::document::JsonObject;
use siteforge_core::repository::{ClientRegistry, TemplateRegistry};
use siteforge_db::repository::{SurrealClientRegistry, SurrealTemplateRegistry};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

const CORE_DB: &str = "core";

/// Helper: spin up in-memory DB and run the registry migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db(CORE_DB).await.unwrap();
    siteforge_db::run_migrations(&db).await.unwrap();
    db
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("test input must be an object"),
    }
}

fn registration(name: &str, field: &str, value: &str) -> ClientRegistration {
    ClientRegistration {
        client_name: name.into(),
        fields: object(json!({ field: value })),
    }
}

// -----------------------------------------------------------------------
// Template registry
// -----------------------------------------------------------------------

#[tokio::test]
async fn upsert_and_get_template() {
    let db = setup().await;
    let registry = SurrealTemplateRegistry::new(db, CORE_DB);

    let documents = vec![
        object(json!({ "_id": "652f1a2b3c4d5e6f70819111", "slug": "" })),
        object(json!({ "_id": "652f1a2b3c4d5e6f70819112", "slug": "", "blocks": [] })),
    ];
    registry.upsert("template-1", &documents).await.unwrap();

    let stored = registry.get("template-1").await.unwrap().unwrap();
    assert_eq!(stored.template_key, "template-1");
    assert_eq!(stored.documents, documents);
}

#[tokio::test]
async fn get_missing_template_returns_none() {
    let db = setup().await;
    let registry = SurrealTemplateRegistry::new(db, CORE_DB);

    assert!(registry.get("absent").await.unwrap().is_none());
}

#[tokio::test]
async fn reapplying_a_key_overwrites_the_single_record() {
    let db = setup().await;
    let registry = SurrealTemplateRegistry::new(db, CORE_DB);

    let first = vec![object(json!({ "_id": "652f1a2b3c4d5e6f70819111", "slug": "" }))];
    registry.upsert("template-1", &first).await.unwrap();
    let before = registry.get("template-1").await.unwrap().unwrap();

    let second = vec![
        object(json!({ "_id": "652f1a2b3c4d5e6f70819111", "slug": "" })),
        object(json!({ "_id": "652f1a2b3c4d5e6f70819112", "title": "" })),
    ];
    registry.upsert("template-1", &second).await.unwrap();
    let after = registry.get("template-1").await.unwrap().unwrap();

    assert_eq!(after.documents, second);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn upserting_same_documents_is_idempotent() {
    let db = setup().await;
    let registry = SurrealTemplateRegistry::new(db, CORE_DB);

    let documents = vec![object(json!({ "_id": "652f1a2b3c4d5e6f70819111", "slug": "" }))];
    registry.upsert("template-1", &documents).await.unwrap();
    registry.upsert("template-1", &documents).await.unwrap();

    let stored = registry.get("template-1").await.unwrap().unwrap();
    assert_eq!(stored.documents, documents);
}

// -----------------------------------------------------------------------
// Client registry
// -----------------------------------------------------------------------

#[tokio::test]
async fn counts_and_names_follow_the_flag_field() {
    let db = setup().await;
    let registry = SurrealClientRegistry::new(db, CORE_DB);

    registry
        .register(&registration("acme", "structure_template", "template-1"))
        .await
        .unwrap();
    registry
        .register(&registration("zenith", "structure_template", "template-1"))
        .await
        .unwrap();
    registry
        .register(&registration("legacy-only", "template", "template-1"))
        .await
        .unwrap();
    registry
        .register(&registration("other", "structure_template", "template-2"))
        .await
        .unwrap();

    assert_eq!(
        registry
            .count_matching("structure_template", "template-1")
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        registry.count_matching("template", "template-1").await.unwrap(),
        1
    );
    assert_eq!(
        registry
            .count_matching("structure_template", "template-9")
            .await
            .unwrap(),
        0
    );

    let mut names = registry
        .names_matching("structure_template", "template-1")
        .await
        .unwrap();
    names.sort();
    assert_eq!(names, vec!["acme", "zenith"]);

    let legacy = registry
        .names_matching("template", "template-1")
        .await
        .unwrap();
    assert_eq!(legacy, vec!["legacy-only"]);
}

#[tokio::test]
async fn field_names_with_query_syntax_are_rejected() {
    let db = setup().await;
    let registry = SurrealClientRegistry::new(db, CORE_DB);

    let err = registry
        .count_matching("x = $v; DELETE client", "template-1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid identifier"), "{err}");

    let err = registry
        .names_matching("bad field", "template-1")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid identifier"), "{err}");
}
