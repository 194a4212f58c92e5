use doclite::doc;
use doclite::filter::{all, query};
use doclite_int_test::test_util::{cleanup, create_test_context, run_test};
use std::thread;

#[test]
fn test_concurrent_inserts() {
    run_test(
        create_test_context,
        |ctx| {
            let mut handles = Vec::new();
            for t in 0..4 {
                let db = ctx.db();
                handles.push(thread::spawn(move || {
                    let collection = db.collection("test").unwrap();
                    for i in 0..25 {
                        collection
                            .insert(doc! { "thread": t, "seq": i })
                            .unwrap();
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            let collection = ctx.db().collection("test")?;
            assert_eq!(collection.size()?, 100);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_reads_and_writes() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            for i in 0..50 {
                collection.insert(doc! { "seq": i })?;
            }

            let mut handles = Vec::new();
            for _ in 0..2 {
                let db = ctx.db();
                handles.push(thread::spawn(move || {
                    let collection = db.collection("test").unwrap();
                    for _ in 0..10 {
                        let cursor = collection.find(all()).unwrap();
                        for document in cursor {
                            document.unwrap();
                        }
                    }
                }));
            }
            for i in 50..75 {
                collection.insert(doc! { "seq": i })?;
            }
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(collection.size()?, 75);

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_updates_on_distinct_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            for t in 0..4 {
                collection.insert(doc! { "_id": (format!("doc-{}", t)), "count": 0 })?;
            }

            let mut handles = Vec::new();
            for t in 0..4 {
                let db = ctx.db();
                handles.push(thread::spawn(move || {
                    let collection = db.collection("test").unwrap();
                    let filter = query(&doc! { "_id": (format!("doc-{}", t)) }).unwrap();
                    for _ in 0..10 {
                        collection
                            .update(filter.clone(), &doc! { "$inc": { "count": 1 } })
                            .unwrap();
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            for document in collection.find_all()? {
                let document = document?;
                assert_eq!(document.get("count").unwrap().as_integer().unwrap(), 10);
            }

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_collections() {
    run_test(
        create_test_context,
        |ctx| {
            let mut handles = Vec::new();
            for t in 0..4 {
                let db = ctx.db();
                handles.push(thread::spawn(move || {
                    let name = format!("collection_{}", t);
                    let collection = db.collection(&name).unwrap();
                    for i in 0..20 {
                        collection.insert(doc! { "seq": i }).unwrap();
                    }
                    assert_eq!(collection.size().unwrap(), 20);
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(ctx.db().list_collection_names()?.len(), 4);

            Ok(())
        },
        cleanup,
    )
}
