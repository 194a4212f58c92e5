use doclite::collection::{insert_if_absent, just_once, UpdateOptions};
use doclite::common::Value;
use doclite::doc;
use doclite::errors::ErrorKind;
use doclite::filter::{all, query};
use doclite_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

#[test]
fn test_update_set() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_many(create_test_docs())?;

            let result = collection.update(
                query(&doc! { "last_name": "Doe" })?,
                &doc! { "$set": { "last_name": "Day" } },
            )?;
            assert_eq!(result.affected_count(), 2);

            let mut cursor = collection.find(query(&doc! { "last_name": "Day" })?)?;
            assert_eq!(cursor.size(), 2);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_set_nested_path() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! {
                "name": "Alice",
                "address": { "city": "Oslo" }
            })?;

            collection.update(all(), &doc! { "$set": { "address.city": "Bergen" } })?;

            let stored = collection.find_one(all())?.unwrap();
            let address = stored.get("address").unwrap().as_document().unwrap();
            assert_eq!(address.get("city").unwrap().as_string().unwrap(), "Bergen");

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_inc_and_unset() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Alice", "age": 30, "nickname": "ally" })?;

            collection.update(
                all(),
                &doc! {
                    "$inc": { "age": 5 },
                    "$unset": { "nickname": 1 }
                },
            )?;

            let stored = collection.find_one(all())?.unwrap();
            assert_eq!(stored.get("age").unwrap().as_integer().unwrap(), 35);
            assert!(stored.get("nickname").is_none());

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_inc_seeds_absent_field() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Alice" })?;

            collection.update(all(), &doc! { "$inc": { "visits": 1 } })?;
            collection.update(all(), &doc! { "$inc": { "visits": 1 } })?;

            let stored = collection.find_one(all())?.unwrap();
            assert_eq!(stored.get("visits").unwrap().as_integer().unwrap(), 2);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_push() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Alice", "tags": ["reader"] })?;

            collection.update(all(), &doc! { "$push": { "tags": "writer" } })?;

            let stored = collection.find_one(all())?.unwrap();
            let tags = stored.get("tags").unwrap().as_array().unwrap();
            assert_eq!(tags.len(), 2);
            assert_eq!(tags[1].as_string().unwrap(), "writer");

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_just_once() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_many(create_test_docs())?;

            let result = collection.update_with_options(
                query(&doc! { "last_name": "Doe" })?,
                &doc! { "$set": { "seen": true } },
                &just_once(),
            )?;
            assert_eq!(result.affected_count(), 1);

            let mut cursor = collection.find(query(&doc! { "seen": true })?)?;
            assert_eq!(cursor.size(), 1);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_no_match_without_upsert() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Alice" })?;

            let result = collection.update(
                query(&doc! { "name": "Bob" })?,
                &doc! { "$set": { "seen": true } },
            )?;
            assert_eq!(result.affected_count(), 0);
            assert_eq!(collection.size()?, 1);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_upsert_seeds_from_filter() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;

            let result = collection.update_with_options(
                query(&doc! { "name": "Bob", "address.city": "Oslo" })?,
                &doc! { "$set": { "age": 25 } },
                &insert_if_absent(),
            )?;
            assert_eq!(result.affected_count(), 1);

            let stored = collection.find_one(all())?.unwrap();
            assert_eq!(stored.get("name").unwrap().as_string().unwrap(), "Bob");
            assert_eq!(stored.get("age").unwrap().as_integer().unwrap(), 25);
            let address = stored.get("address").unwrap().as_document().unwrap();
            assert_eq!(address.get("city").unwrap().as_string().unwrap(), "Oslo");

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_upsert_without_literal_filter_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;

            let result = collection.update_with_options(
                query(&doc! { "age": { "$gt": 30 } })?,
                &doc! { "$set": { "seen": true } },
                &insert_if_absent(),
            );
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::UpsertSeedFailed);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_upsert_skipped_when_matches_exist() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Bob" })?;

            collection.update_with_options(
                query(&doc! { "name": "Bob" })?,
                &doc! { "$set": { "age": 25 } },
                &insert_if_absent(),
            )?;

            assert_eq!(collection.size()?, 1);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_one() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "_id": "user-1", "name": "Alice", "age": 30 })?;

            let result = collection.update_one(
                &doc! { "_id": "user-1", "name": "Alicia" },
                false,
            )?;
            assert_eq!(result.affected_count(), 1);

            let stored = collection.get_by_id(&Value::from("user-1"))?.unwrap();
            assert_eq!(stored.get("name").unwrap().as_string().unwrap(), "Alicia");
            // untouched fields survive
            assert_eq!(stored.get("age").unwrap().as_integer().unwrap(), 30);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_one_without_id_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;

            let result = collection.update_one(&doc! { "name": "Alice" }, false);
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::NotIdentifiable);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_one_insert_if_absent() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;

            let result = collection.update_one(
                &doc! { "_id": "user-1", "name": "Alice" },
                true,
            )?;
            assert_eq!(result.affected_count(), 1);

            let stored = collection.get_by_id(&Value::from("user-1"))?.unwrap();
            assert_eq!(stored.get("name").unwrap().as_string().unwrap(), "Alice");

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_rejects_non_operator_keys() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "name": "Alice" })?;

            let result = collection.update(all(), &doc! { "name": "Bob" });
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::ValidationError);

            let result = collection.update(all(), &doc! {});
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::ValidationError);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_rejects_wildcard_target() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "data": [1, 2, 3] })?;

            let result = collection.update(all(), &doc! { "$set": { "data[]": 0 } });
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidWritePath);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_rejects_non_numeric_inc() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "age": 30 })?;

            let result = collection.update(all(), &doc! { "$inc": { "age": "five" } });
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::TypeMismatch);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_failure_leaves_earlier_matches_applied() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert(doc! { "_id": "a", "count": 1 })?;
            collection.insert(doc! { "_id": "b", "count": "one" })?;

            // $inc fails on the non-numeric slot mid-run
            let result = collection.update(all(), &doc! { "$inc": { "count": 1 } });
            assert!(result.is_err());

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_options_accessors() {
    let options = UpdateOptions::new(true, false);
    assert!(options.is_insert_if_absent());
    assert!(!options.is_just_once());
}
