//! Mutation Semantics Tests
//!
//! Tests for batch mutation behaviour:
//! - Create ignores supplied identifiers
//! - Update counts only rows whose value changes
//! - Payload keys match ignoring case
//! - Rejected commits leave the table as it was
//! - Legacy mixed batches run delete, update, create in order
//! - Nullable references clear on explicit null

use cereal_api::mutation::{IdBatch, MutationEngine, MutationError, PatchBatch};
use cereal_api::records::{Cereal, PartialRecord, Product, ProductImage, Record};
use cereal_api::store::{Catalog, RecordStore, StoreError};
use serde_json::json;
use uuid::Uuid;

fn batch<P: PartialRecord>(value: serde_json::Value) -> PatchBatch<P> {
    serde_json::from_value(value).unwrap()
}

fn rows<R: Record>(catalog: &Catalog) -> Vec<R>
where
    Catalog: RecordStore<R>,
{
    RecordStore::<R>::scan(catalog).unwrap()
}

// =============================================================================
// Create Tests
// =============================================================================

/// Supplied identifiers are replaced by store-assigned ones.
#[test]
fn test_create_ignores_supplied_id() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    let supplied = Uuid::new_v4();

    let outcome = engine
        .create(batch(json!([{"id": supplied, "name": "Corn Flakes"}])).entries())
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);
    assert_eq!(outcome.message, "Created successfully");

    let stored = rows::<Product>(&catalog);
    assert_eq!(stored.len(), 1);
    assert!(stored[0].id.is_some());
    assert_ne!(stored[0].id, Some(supplied));
}

/// Two entries with the same supplied identifier become two rows.
#[test]
fn test_create_duplicate_supplied_ids() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    let supplied = Uuid::new_v4();

    engine
        .create(batch(json!([{"id": supplied}, {"id": supplied}])).entries())
        .unwrap();
    let stored = rows::<Product>(&catalog);
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].id, stored[1].id);
}

/// One invalid row rejects the whole batch.
#[test]
fn test_create_constraint_violation_rolls_back() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Cereal, Catalog>::new(&catalog);

    let err = engine
        .create(batch(json!([{"name": "Cheerios"}, {"name": "  "}])).entries())
        .unwrap_err();
    assert!(matches!(
        err,
        MutationError::Store(StoreError::ConstraintViolation { .. })
    ));
    assert_eq!(err.code(), "CEREAL_PERSISTENCE_FAILED");
    assert!(rows::<Cereal>(&catalog).is_empty());
}

/// Row limits are enforced on the committed table.
#[test]
fn test_create_capacity_exceeded_rolls_back() {
    let catalog = Catalog::new(Some(2));
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);

    engine.create(batch(json!([{"name": "a"}])).entries()).unwrap();
    let err = engine
        .create(batch(json!([{"name": "b"}, {"name": "c"}])).entries())
        .unwrap_err();
    assert!(matches!(
        err,
        MutationError::Store(StoreError::CapacityExceeded { .. })
    ));
    assert_eq!(rows::<Product>(&catalog).len(), 1);
}

#[test]
fn test_empty_batches_rejected() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);

    assert!(matches!(engine.create(&[]), Err(MutationError::EmptyBatch)));
    assert!(matches!(engine.update(&[]), Err(MutationError::EmptyBatch)));
    assert!(matches!(engine.delete(&[]), Err(MutationError::EmptyBatch)));

    // only nulls
    let nulls: PatchBatch<<Product as Record>::Patch> = batch(json!([null, null]));
    assert!(matches!(
        engine.apply_mixed(nulls),
        Err(MutationError::EmptyBatch)
    ));
}

// =============================================================================
// Update Tests
// =============================================================================

/// Rewriting a row with its current values is not counted.
#[test]
fn test_update_counts_changed_rows_only() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine
        .create(batch(json!([{"name": "a", "fat": 1}, {"name": "b", "fat": 2}])).entries())
        .unwrap();
    let stored = rows::<Product>(&catalog);
    let (a, b) = (stored[0].id.unwrap(), stored[1].id.unwrap());

    let outcome = engine
        .update(
            batch(json!([
                {"id": a, "fat": 1},
                {"id": b, "fat": 3},
                {"id": b, "fat": 4},
                {"id": Uuid::new_v4(), "fat": 9},
                {"fat": 9}
            ]))
            .entries(),
        )
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);

    let after = rows::<Product>(&catalog);
    assert_eq!(after[0].attributes.fat, 1);
    assert_eq!(after[1].attributes.fat, 4);
}

/// Entries that put a row back as it was leave it uncounted.
#[test]
fn test_update_reverted_row_not_counted() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine
        .create(batch(json!([{"name": "a", "fat": 1}, {"name": "b", "fat": 2}])).entries())
        .unwrap();
    let stored = rows::<Product>(&catalog);
    let (a, b) = (stored[0].id.unwrap(), stored[1].id.unwrap());

    let outcome = engine
        .update(
            batch(json!([
                {"id": a, "fat": 5},
                {"id": b, "fat": 7},
                {"id": a, "fat": 1}
            ]))
            .entries(),
        )
        .unwrap();
    assert_eq!(outcome.affected_rows, 1);

    let only_reverted = engine
        .update(batch(json!([{"id": a, "fat": 5}, {"id": a, "fat": 1}])).entries())
        .unwrap();
    assert_eq!(only_reverted.affected_rows, 0);
    assert!(!only_reverted.success);
    assert_eq!(rows::<Product>(&catalog)[0].attributes.fat, 1);
}

/// A batch touching no row reports failure without erroring.
#[test]
fn test_update_without_match_reports_no_rows() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);

    let outcome = engine
        .update(batch(json!([{"id": Uuid::new_v4(), "name": "x"}])).entries())
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.affected_rows, 0);
    assert_eq!(outcome.message, "No rows updated");
}

/// Blanking a required column rejects the update.
#[test]
fn test_update_constraint_violation_rolls_back() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Cereal, Catalog>::new(&catalog);
    engine.create(batch(json!([{"name": "Trix"}])).entries()).unwrap();
    let id = rows::<Cereal>(&catalog)[0].id.unwrap();

    let err = engine
        .update(batch(json!([{"id": id, "name": "", "sugars": 12}])).entries())
        .unwrap_err();
    assert!(matches!(err, MutationError::Store(_)));

    let stored = &rows::<Cereal>(&catalog)[0];
    assert_eq!(stored.attributes.name, "Trix");
    assert_eq!(stored.attributes.sugars, 0);
}

/// Explicit null detaches an image; an omitted key keeps the reference.
#[test]
fn test_image_reference_tri_state() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<ProductImage, Catalog>::new(&catalog);
    let product = Uuid::new_v4();

    engine
        .create(
            batch(json!([
                {"productReference": product, "imagePath": "a.png"},
                {"productReference": product, "imagePath": "b.png"}
            ]))
            .entries(),
        )
        .unwrap();
    let stored = rows::<ProductImage>(&catalog);
    let (a, b) = (stored[0].id.unwrap(), stored[1].id.unwrap());

    let outcome = engine
        .update(
            batch(json!([
                {"id": a, "productReference": null},
                {"id": b, "imagePath": "c.png"}
            ]))
            .entries(),
        )
        .unwrap();
    assert_eq!(outcome.affected_rows, 2);

    let after = rows::<ProductImage>(&catalog);
    assert_eq!(after[0].product_reference, None);
    assert_eq!(after[0].image_path, "a.png");
    assert_eq!(after[1].product_reference, Some(product));
    assert_eq!(after[1].image_path, "c.png");
}

// =============================================================================
// Delete Tests
// =============================================================================

/// Duplicates collapse; blank and nil identifiers are dropped while decoding.
#[test]
fn test_delete_collapses_duplicates() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine
        .create(batch(json!([{"name": "a"}, {"name": "b"}])).entries())
        .unwrap();
    let a = rows::<Product>(&catalog)[0].id.unwrap();

    let ids: IdBatch =
        serde_json::from_value(json!([a, a, "", null, Uuid::nil()])).unwrap();
    assert_eq!(ids.ids().len(), 2);

    let outcome = engine.delete(ids.ids()).unwrap();
    assert_eq!(outcome.affected_rows, 1);
    assert_eq!(outcome.message, "Deleted successfully");
    assert_eq!(rows::<Product>(&catalog).len(), 1);
}

/// A repeated delete succeeds with nothing left to remove.
#[test]
fn test_delete_is_idempotent() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine.create(batch(json!([{"name": "a"}])).entries()).unwrap();
    let a = rows::<Product>(&catalog)[0].id.unwrap();

    assert_eq!(engine.delete(&[a]).unwrap().affected_rows, 1);
    let again = engine.delete(&[a]).unwrap();
    assert_eq!(again.affected_rows, 0);
    assert!(!again.success);
    assert_eq!(again.message, "No rows deleted");
}

#[test]
fn test_delete_rejects_malformed_id() {
    let result: Result<IdBatch, _> = serde_json::from_value(json!(["not-a-uuid"]));
    assert!(result.is_err());
}

// =============================================================================
// Legacy Mixed Batch Tests
// =============================================================================

/// Groups run delete, then update, then create; each reports one outcome.
#[test]
fn test_mixed_batch_order_and_outcomes() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine
        .create(batch(json!([{"name": "keep"}, {"name": "drop"}])).entries())
        .unwrap();
    let stored = rows::<Product>(&catalog);
    let (keep, drop) = (stored[0].id.unwrap(), stored[1].id.unwrap());

    let outcome = engine
        .apply_mixed(batch(json!([
            {"name": "new"},
            {"id": keep, "calories": 90},
            {"id": drop, "delete": true}
        ])))
        .unwrap();

    let messages: Vec<&str> = outcome
        .outcomes()
        .iter()
        .map(|o| o.message.as_str())
        .collect();
    assert_eq!(
        messages,
        ["Deleted successfully", "Updated successfully", "Created successfully"]
    );
    assert_eq!(outcome.affected_rows(), 3);

    let after = rows::<Product>(&catalog);
    let names: Vec<&str> = after.iter().map(|r| r.attributes.name.as_str()).collect();
    assert_eq!(names, ["keep", "new"]);
    assert_eq!(after[0].attributes.calories, 90);
}

/// Capitalised keys still route an entry to the update group.
#[test]
fn test_mixed_batch_keys_ignore_case() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);
    engine
        .create(batch(json!([{"name": "a"}, {"name": "b"}])).entries())
        .unwrap();
    let stored = rows::<Product>(&catalog);
    let (a, b) = (stored[0].id.unwrap(), stored[1].id.unwrap());

    let outcome = engine
        .apply_mixed(batch(json!([
            {"Id": a, "Name": "Rebranded"},
            {"ID": b, "DELETE": true}
        ])))
        .unwrap();
    let messages: Vec<&str> = outcome
        .outcomes()
        .iter()
        .map(|o| o.message.as_str())
        .collect();
    assert_eq!(messages, ["Deleted successfully", "Updated successfully"]);

    let after = rows::<Product>(&catalog);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, Some(a));
    assert_eq!(after[0].attributes.name, "Rebranded");
}

/// Empty groups are skipped.
#[test]
fn test_mixed_batch_creates_only() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Product, Catalog>::new(&catalog);

    let outcome = engine
        .apply_mixed(batch(json!([{"name": "a"}, null, {"name": "b"}])))
        .unwrap();
    assert_eq!(outcome.outcomes().len(), 1);
    assert_eq!(outcome.affected_rows(), 2);
    assert_eq!(serde_json::to_value(&outcome).unwrap()[0]["affectedRows"], 2);
}

/// A failing later group does not undo an earlier one.
#[test]
fn test_mixed_batch_groups_commit_independently() {
    let catalog = Catalog::new(None);
    let engine = MutationEngine::<Cereal, Catalog>::new(&catalog);
    engine.create(batch(json!([{"name": "Kix"}])).entries()).unwrap();
    let id = rows::<Cereal>(&catalog)[0].id.unwrap();

    let err = engine
        .apply_mixed(batch(json!([{"id": id, "delete": true}, {"name": ""}])))
        .unwrap_err();
    assert!(matches!(err, MutationError::Store(_)));
    assert!(rows::<Cereal>(&catalog).is_empty());
}
