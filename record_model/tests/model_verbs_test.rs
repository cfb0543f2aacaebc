//! Model verb tests against an in-memory record store
//!
//! Covers extension, CRUD verbs, error translation and the save/delete helpers.

mod common;

use common::MemoryStore;
use record_model::prelude::*;
use std::sync::Arc;

fn accounts_with(store: Arc<MemoryStore>) -> GenericModel {
    GenericModel::extend(
        PartialModel::new()
            .table("accounts")
            .field("name", FieldType::Text)
            .field("email", FieldType::Text)
            .field("balance", FieldType::Integer)
            .key_type(FieldType::BigInt)
            .connection(store),
    )
    .expect("valid model definition")
}

fn setup() -> (Arc<MemoryStore>, GenericModel) {
    let store = Arc::new(MemoryStore::new().with_unique("email"));
    let model = accounts_with(store.clone());
    (store, model)
}

fn account(name: &str, email: &str, balance: i64) -> Values {
    Values::new()
        .set("name", json!(name))
        .set("email", json!(email))
        .set("balance", json!(balance))
}

async fn seed(model: &GenericModel) {
    model.create(account("carol", "carol@example.com", 30)).await.unwrap();
    model.create(account("alice", "alice@example.com", 10)).await.unwrap();
    model.create(account("bob", "bob@example.com", 10)).await.unwrap();
}

fn names(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .map(|doc| doc.get("name").and_then(Value::as_str).unwrap())
        .collect()
}

// ========================================
// Extension and field names
// ========================================

#[test]
fn test_field_names() {
    let (_, model) = setup();

    assert_eq!(model.field_names(false), vec!["name", "email", "balance"]);
    assert_eq!(model.field_names(true), vec!["name", "email", "balance", "key"]);
    assert!(!model.field_names(false).contains(&"key"));
    assert_eq!(model.field_names(true).last(), Some(&"key"));
    assert_eq!(model.field_names(true), model.field_names(true));
}

#[test]
fn test_extend_requires_connection_table_and_fields() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    let missing_connection = PartialModel::new()
        .table("accounts")
        .field("name", FieldType::Text);
    assert_eq!(
        GenericModel::extend(missing_connection).unwrap_err(),
        ConfigurationError::MissingConnection
    );

    let missing_table = PartialModel::new()
        .field("name", FieldType::Text)
        .connection(store.clone());
    assert_eq!(
        GenericModel::extend(missing_table).unwrap_err(),
        ConfigurationError::MissingTable
    );

    let missing_fields = PartialModel::new().table("accounts").connection(store.clone());
    assert_eq!(
        GenericModel::extend(missing_fields).unwrap_err(),
        ConfigurationError::MissingFields
    );

    let no_fields = PartialModel::new()
        .table("tokens")
        .fields(Vec::<(String, FieldType)>::new())
        .connection(store);
    let model = GenericModel::extend(no_fields).expect("an empty field list is allowed");
    assert_eq!(model.field_names(true), vec!["key"]);
}

#[test]
fn test_extend_rejects_invalid_names() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    let result = GenericModel::extend(
        PartialModel::new()
            .table("accounts")
            .field("key", FieldType::BigInt)
            .connection(store.clone()),
    );
    assert_eq!(result.unwrap_err(), ConfigurationError::ReservedKeyField);

    let result = GenericModel::extend(
        PartialModel::new()
            .table("accounts; DROP TABLE accounts")
            .field("name", FieldType::Text)
            .connection(store),
    );
    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidIdentifier(_))
    ));
}

// ========================================
// create
// ========================================

#[tokio::test]
async fn test_create_returns_declared_fields_and_key() {
    let (_, model) = setup();

    let created = model
        .create(account("alice", "alice@example.com", 10))
        .await
        .unwrap();

    assert_eq!(created.get("name"), Some(&json!("alice")));
    assert_eq!(created.get("email"), Some(&json!("alice@example.com")));
    assert_eq!(created.get("balance"), Some(&json!(10)));
    assert!(created.key().is_some());
    assert_eq!(created.as_map().len(), 4);
}

#[tokio::test]
async fn test_create_duplicate_fails_with_entity_exists() {
    let (store, model) = setup();
    model
        .create(account("alice", "alice@example.com", 10))
        .await
        .unwrap();

    let error = model
        .create(account("alice again", "alice@example.com", 0))
        .await
        .unwrap_err();

    assert!(error.is_entity_exists());
    match error {
        ModelError::EntityExists { table, source } => {
            assert_eq!(table, "accounts");
            assert!(matches!(source, StoreFailure::UniqueViolation { .. }));
        }
        other => panic!("Expected EntityExists, got {:?}", other),
    }
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn test_create_other_failures_propagate_unchanged() {
    let (store, model) = setup();
    store.fail_next("connection reset by peer");

    let error = model
        .create(account("alice", "alice@example.com", 10))
        .await
        .unwrap_err();

    assert!(!error.is_entity_exists());
    assert_eq!(error.to_string(), "connection reset by peer");
    assert!(matches!(
        error,
        ModelError::Store(StoreFailure::Unclassified { .. })
    ));
}

#[tokio::test]
async fn test_create_with_unknown_column_is_a_store_failure() {
    let (_, model) = setup();

    let error = model
        .create(account("alice", "alice@example.com", 10).set("nickname", json!("al")))
        .await
        .unwrap_err();

    assert!(matches!(error, ModelError::Store(_)));
}

// ========================================
// find / find_one / count
// ========================================

#[tokio::test]
async fn test_find_on_empty_table_is_empty() {
    let (_, model) = setup();

    let documents = model.find(Query::new(), FindOptions::new()).await.unwrap();

    assert!(documents.is_empty());
}

#[tokio::test]
async fn test_find_everything_and_filter() {
    let (_, model) = setup();
    seed(&model).await;

    let all = model.find(Query::new(), FindOptions::new()).await.unwrap();
    assert_eq!(all.len(), 3);

    let tens = model
        .find(Query::new().eq("balance", json!(10)), FindOptions::new())
        .await
        .unwrap();
    assert_eq!(tens.len(), 2);

    let bob = model
        .find(
            Query::new().eq("balance", json!(10)).eq("name", json!("bob")),
            FindOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(names(&bob), vec!["bob"]);
}

#[tokio::test]
async fn test_find_applies_ordering_clauses_in_sequence() {
    let (_, model) = setup();
    seed(&model).await;

    let by_name = model
        .find(Query::new(), FindOptions::new().order_by("name", SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(names(&by_name), vec!["alice", "bob", "carol"]);

    let by_balance_then_name = model
        .find(
            Query::new(),
            FindOptions::new()
                .order_by("balance", SortOrder::Desc)
                .order_by("name", SortOrder::Desc),
        )
        .await
        .unwrap();
    assert_eq!(names(&by_balance_then_name), vec!["carol", "bob", "alice"]);
}

#[tokio::test]
async fn test_find_one_requests_a_single_row() {
    let (store, model) = setup();
    seed(&model).await;

    let found = model
        .find_one(Query::new().eq("balance", json!(10)))
        .await
        .unwrap();

    assert_eq!(found.get("balance"), Some(&json!(10)));
    assert_eq!(store.select_limits(), vec![Some(1)]);
}

#[tokio::test]
async fn test_find_one_without_match_fails_with_not_found() {
    let (_, model) = setup();
    seed(&model).await;

    let error = model
        .find_one(Query::new().eq("name", json!("mallory")))
        .await
        .unwrap_err();

    assert!(error.is_entity_not_found());
}

#[tokio::test]
async fn test_count_parses_store_representation() {
    let (_, model) = setup();
    assert_eq!(model.count(Query::new()).await.unwrap(), 0);

    seed(&model).await;

    assert_eq!(model.count(Query::new()).await.unwrap(), 3);
    assert_eq!(
        model
            .count(Query::new().eq("balance", json!(10)))
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_invalid_identifiers_never_reach_the_store() {
    let (store, model) = setup();

    let error = model
        .find(Query::new().eq("name OR 1=1", json!(1)), FindOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(error, ModelError::InvalidIdentifier(_)));

    let error = model
        .find(
            Query::new(),
            FindOptions::new().order_by("name DESC, (SELECT 1)", SortOrder::Asc),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, ModelError::InvalidIdentifier(_)));

    assert!(store.calls().is_empty());
}

// ========================================
// update / destroy
// ========================================

#[tokio::test]
async fn test_update_returns_every_updated_document() {
    let (_, model) = setup();
    seed(&model).await;

    let updated = model
        .update(
            Query::new().eq("balance", json!(10)),
            Values::new().set("balance", json!(15)),
        )
        .await
        .unwrap();

    assert_eq!(updated.len(), 2);
    assert!(updated
        .iter()
        .all(|doc| doc.get("balance") == Some(&json!(15))));
    assert_eq!(
        model
            .count(Query::new().eq("balance", json!(15)))
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_update_without_matches_is_empty() {
    let (_, model) = setup();
    seed(&model).await;

    let updated = model
        .update(
            Query::new().eq("name", json!("mallory")),
            Values::new().set("balance", json!(0)),
        )
        .await
        .unwrap();

    assert!(updated.is_empty());
}

#[tokio::test]
async fn test_update_with_no_values_is_rejected() {
    let (store, model) = setup();

    let error = model.update(Query::new(), Values::new()).await.unwrap_err();

    assert!(matches!(error, ModelError::EmptyValues { .. }));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_destroy_returns_prior_values() {
    let (_, model) = setup();
    seed(&model).await;

    let destroyed = model
        .destroy(Query::new().eq("name", json!("carol")))
        .await
        .unwrap();

    assert_eq!(destroyed.len(), 1);
    assert_eq!(destroyed[0].get("balance"), Some(&json!(30)));
    assert_eq!(model.count(Query::new()).await.unwrap(), 2);

    let nothing = model
        .destroy(Query::new().eq("name", json!("carol")))
        .await
        .unwrap();
    assert!(nothing.is_empty());
}

// ========================================
// save / delete
// ========================================

#[tokio::test]
async fn test_save_only_writes_declared_fields() {
    let (store, model) = setup();
    let mut document = model
        .create(account("alice", "alice@example.com", 10))
        .await
        .unwrap();

    document.insert("balance", json!(99));
    document.insert("created_at", json!("2024-01-01T00:00:00Z"));

    // The store rejects unknown columns, so this only succeeds if created_at was dropped
    let saved = model.save(&document).await.unwrap();

    assert_eq!(saved.get("balance"), Some(&json!(99)));
    assert_eq!(saved.key(), document.key());
    assert!(saved.get("created_at").is_none());
    assert_eq!(store.calls().last().map(String::as_str), Some("update"));
}

#[tokio::test]
async fn test_save_and_delete_of_missing_rows_fail_with_not_found() {
    let (_, model) = setup();
    let ghost = Document::try_from(json!({
        "key": 404,
        "name": "ghost",
        "email": "ghost@example.com",
        "balance": 0
    }))
    .unwrap();

    assert!(model.save(&ghost).await.unwrap_err().is_entity_not_found());
    assert!(model.delete(&ghost).await.unwrap_err().is_entity_not_found());
}

#[tokio::test]
async fn test_save_and_delete_require_a_key() {
    let (store, model) = setup();
    let keyless = Document::try_from(json!({"name": "nobody"})).unwrap();

    assert!(matches!(
        model.save(&keyless).await,
        Err(ModelError::MissingKey)
    ));
    assert!(matches!(
        model.delete(&keyless).await,
        Err(ModelError::MissingKey)
    ));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_save_without_declared_fields_fails_with_empty_values() {
    let (store, model) = setup();
    let created = model
        .create(account("dave", "dave@example.com", 3))
        .await
        .unwrap();
    let calls_before = store.calls().len();

    let key_only = Document::try_from(json!({"key": created.key().cloned().unwrap()})).unwrap();
    assert!(matches!(
        model.save(&key_only).await,
        Err(ModelError::EmptyValues { .. })
    ));

    // Undeclared properties are dropped before the emptiness check
    let extras_only = Document::try_from(json!({
        "key": created.key().cloned().unwrap(),
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert!(matches!(
        model.save(&extras_only).await,
        Err(ModelError::EmptyValues { .. })
    ));

    assert_eq!(store.calls().len(), calls_before);
}

#[tokio::test]
async fn test_delete_removes_the_document_row() {
    let (_, model) = setup();
    seed(&model).await;
    let bob = model
        .find_one(Query::new().eq("name", json!("bob")))
        .await
        .unwrap();

    let deleted = model.delete(&bob).await.unwrap();

    assert_eq!(deleted, bob);
    assert!(model
        .find_one(Query::by_key(bob.key().cloned().unwrap()))
        .await
        .unwrap_err()
        .is_entity_not_found());
}

// ========================================
// Round trip and concrete models
// ========================================

#[tokio::test]
async fn test_create_then_find_one_by_key_round_trips() {
    let (_, model) = setup();

    let created = model
        .create(account("dave", "dave@example.com", 7))
        .await
        .unwrap();
    let found = model
        .find_one(Query::by_key(created.key().cloned().unwrap()))
        .await
        .unwrap();

    assert_eq!(found, created);
}

struct Accounts(GenericModel);

impl Model for Accounts {
    fn definition(&self) -> &ModelDefinition {
        self.0.definition()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Account {
    key: i64,
    name: String,
    email: String,
    balance: i64,
}

#[tokio::test]
async fn test_concrete_model_gets_every_verb() {
    let (_, generic) = setup();
    let accounts = Accounts(generic);

    let created = accounts
        .create(account("erin", "erin@example.com", 3))
        .await
        .unwrap();
    let typed: Account = created.clone().into_typed().unwrap();

    assert_eq!(accounts.table_name(), "accounts");
    assert_eq!(typed.name, "erin");
    assert_eq!(typed.key, created.key().and_then(Value::as_i64).unwrap());
    assert_eq!(accounts.count(Query::new()).await.unwrap(), 1);
}
