use doclite::doc;
use doclite::errors::{DocLiteError, DocLiteResult, ErrorKind};
use doclite::store::memory::InMemoryStoreModule;
use doclite::store::{DocStore, StoreModule};
use doclite::DocLite;
use doclite_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_open_or_create_defaults_to_in_memory() {
    let db = DocLite::builder().open_or_create().unwrap();
    assert!(!db.is_closed().unwrap());
    db.close().unwrap();
}

#[test]
fn test_open_with_explicit_module() {
    let db = DocLite::builder()
        .load_module(InMemoryStoreModule::new())
        .open_or_create()
        .unwrap();
    assert!(!db.is_closed().unwrap());
    db.close().unwrap();
}

#[test]
fn test_builder_error_surfaces_at_open() {
    struct FailingStoreModule;

    impl StoreModule for FailingStoreModule {
        fn store(&self) -> DocLiteResult<DocStore> {
            Err(DocLiteError::new(
                "Backend unavailable",
                ErrorKind::StoreNotInitialized,
            ))
        }
    }

    let result = DocLite::builder()
        .load_module(FailingStoreModule)
        .open_or_create();
    assert_eq!(
        result.unwrap_err().kind(),
        &ErrorKind::StoreNotInitialized
    );
}

#[test]
fn test_collection_name_validation() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            assert!(db.collection("").is_err());
            assert!(db.collection("has space").is_err());
            assert!(db.collection("$doclite_catalog").is_err());
            assert!(db.collection("_id").is_err());

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_list_collection_names() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            assert!(!db.has_collection("users")?);

            db.collection("users")?;
            db.collection("orders")?;

            assert!(db.has_collection("users")?);
            let names = db.list_collection_names()?;
            assert!(names.contains("users"));
            assert!(names.contains("orders"));
            assert_eq!(names.len(), 2);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_destroy_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let users = db.collection("users")?;
            users.insert(doc! { "name": "Alice" })?;

            db.destroy_collection("users")?;
            assert!(!db.has_collection("users")?);
            assert!(users.is_dropped()?);

            // the name can be reused afterwards
            let recreated = db.collection("users")?;
            assert_eq!(recreated.size()?, 0);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_clones_share_database() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let clone = db.clone();

            clone
                .collection("users")?
                .insert(doc! { "name": "Alice" })?;
            assert_eq!(db.collection("users")?.size()?, 1);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_dropping_last_handle_closes_store() {
    let db = DocLite::builder().open_or_create().unwrap();
    let store = db.store().unwrap();
    drop(db);
    assert!(store.is_closed().unwrap());
}

#[test]
fn test_commit() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.collection("users")?.insert(doc! { "name": "Alice" })?;
            db.commit()?;
            assert!(!db.has_unsaved_changes()?);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_close_is_terminal() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.collection("users")?;
            db.close()?;

            assert!(db.is_closed()?);
            assert_eq!(
                db.collection("users").unwrap_err().kind(),
                &ErrorKind::InvalidOperation
            );
            assert_eq!(
                db.list_collection_names().unwrap_err().kind(),
                &ErrorKind::InvalidOperation
            );

            Ok(())
        },
        |_| Ok(()),
    )
}

#[test]
fn test_load_module_after_open_rejected() {
    run_test(
        create_test_context,
        |ctx| {
            let result = ctx
                .db()
                .config()
                .load_module(InMemoryStoreModule::new());
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);

            Ok(())
        },
        cleanup,
    )
}
