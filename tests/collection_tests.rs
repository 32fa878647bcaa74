use rustmemocollect::{Collection, CollectionError};
use serde_json::{Value, json};

fn records() -> Collection {
    Collection::new(vec![
        json!({"id": 1, "name": "a", "status": "active"}),
        json!({"id": 2, "name": "b", "status": "inactive"}),
        json!({"id": 3, "name": "c", "status": "active"}),
    ])
}

#[test]
fn test_to_array_preserves_source_order() {
    let source = vec![json!(3), json!("x"), json!(null), json!({"k": 1})];
    assert_eq!(Collection::new(source.clone()).to_array(), source);
}

#[test]
fn test_where_matches_loosely_and_leaves_receiver() {
    let collection = records();
    let before = collection.clone();

    let active = collection.where_eq("status", "active");
    assert_eq!(active.count(), 2);
    for (_, element) in &active {
        assert_eq!(element["status"], "active");
    }

    assert_eq!(collection.where_eq("id", "2").count(), 1);
    assert_eq!(collection, before);
}

#[test]
fn test_where_row_first_match_or_none() {
    let collection = records();
    assert_eq!(collection.where_row("status", "active").unwrap()["id"], 1);
    assert!(collection.where_row("status", "archived").is_none());
    assert!(Collection::default().where_row("status", "active").is_none());
}

#[test]
fn test_list_name_by_id() {
    let collection = Collection::new(vec![
        json!({"id": 1, "name": "a"}),
        json!({"id": 2, "name": "b"}),
    ]);
    assert_eq!(
        Value::Object(collection.list("name", "id")),
        json!({"1": "a", "2": "b"})
    );
}

#[test]
fn test_is_empty_until_push() {
    let mut collection = Collection::default();
    assert!(collection.is_empty());
    collection.push(json!("first"));
    assert!(!collection.is_empty());
    assert!(collection.has_one_element());
}

#[test]
fn test_slice_inclusive_and_exclusive() {
    let collection = Collection::from_json(json!(["a", "b", "c", "d", "e"]));
    assert_eq!(collection.slice(1, 3, true), vec![json!("b"), json!("c"), json!("d")]);
    assert_eq!(collection.slice(1, 3, false), vec![json!("b"), json!("c")]);
}

#[test]
fn test_filter_projection() {
    let collection = Collection::new(vec![json!({"id": 1, "extra": "x"})]);
    assert_eq!(collection.filter(&["id"]).to_vec(), vec![json!({"id": 1})]);

    let doubled = Collection::new(vec![json!({"id": 5})])
        .filter(&["id"])
        .map_value(|_, _, raw| raw.and_then(Value::as_i64).map(|n| json!(n * 2)))
        .to_vec();
    assert_eq!(doubled, vec![json!({"id": 10})]);
}

#[test]
fn test_count() {
    assert_eq!(Collection::from_json(json!([1, 2, 3])).count(), 3);
    assert_eq!(Collection::default().count(), 0);
}

#[test]
fn test_collect_is_independent() {
    let receiver = records();
    let mut collected = receiver.collect(vec![json!(1), json!(2)]);
    collected.push(json!(3));

    assert_eq!(collected.count(), 3);
    assert_eq!(receiver.count(), 3);
    assert_eq!(receiver.first().unwrap()["id"], 1);
}

#[test]
fn test_has_one_element_tracks_count() {
    for n in 0..4 {
        let collection: Collection = (0..n).map(Value::from).collect();
        assert_eq!(collection.has_one_element(), collection.count() == 1);
    }
}

#[test]
fn test_push_after_primitives_appends() {
    let mut collection = Collection::from_json(json!([10, 20]));
    collection.push(json!(30));
    assert_eq!(collection.to_array(), vec![json!(10), json!(20), json!(30)]);
}

#[test]
fn test_push_after_record_replaces_first() {
    let mut collection = records();
    collection.push(json!({"id": 4, "name": "d"}));

    assert_eq!(collection.count(), 3);
    assert_eq!(collection.get(0).unwrap()["id"], 4);
    assert_eq!(collection.get(2).unwrap()["id"], 3);
}

#[test]
fn test_filter_into_collection_supports_queries() -> anyhow::Result<()> {
    let names = records()
        .filter(&["id", "name"])
        .when(|element, _, _| element["status"] == "active")
        .into_collection();

    assert_eq!(names.count(), 3);
    assert_eq!(names.get(1), Some(&json!({})));
    assert_eq!(names.where_row("name", "c"), Some(&json!({"id": 3, "name": "c"})));

    let rows = names.to_array_full()?;
    assert_eq!(rows[0], json!([1, "a"]));
    Ok(())
}

#[test]
fn test_to_array_full_rejects_scalars() {
    let err = Collection::from_json(json!([[1], "x"])).to_array_full().unwrap_err();
    assert!(matches!(err, CollectionError::NotConvertible { index: 1, .. }));
    assert_eq!(err.to_string(), "Element at index 1 (string) has no array form");
}

#[test]
fn test_to_json_round_trip() -> anyhow::Result<()> {
    let collection = records();
    let text = serde_json::to_string(&collection)?;
    let back: Collection = serde_json::from_str(&text)?;
    assert_eq!(back, collection);
    assert_eq!(collection.to_json()["2"]["name"], "c");
    Ok(())
}
