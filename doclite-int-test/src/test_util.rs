use doclite::collection::Document;
use doclite::doc;
use doclite::errors::DocLiteResult;
use doclite::DocLite;

// Setup only one time throughout the project.
// It will take effect during test, project wide
#[ctor::ctor]
fn init() {
    colog::init();
}

/// Runs a test with setup and teardown.
///
/// The teardown runs even when the test body fails or panics, so a broken
/// test never leaks an open database into the next one.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> DocLiteResult<TestContext>,
    T: Fn(TestContext) -> DocLiteResult<()>,
    A: Fn(TestContext) -> DocLiteResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || test(test_ctx)));

    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => {
            let message = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            panic!("Test panicked: {}", message);
        }
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    db: DocLite,
}

impl TestContext {
    pub fn new(db: DocLite) -> Self {
        Self { db }
    }

    pub fn db(&self) -> DocLite {
        self.db.clone()
    }
}

pub fn create_test_context() -> DocLiteResult<TestContext> {
    let db = DocLite::builder().open_or_create()?;
    Ok(TestContext::new(db))
}

pub fn cleanup(ctx: TestContext) -> DocLiteResult<()> {
    let db = ctx.db();
    if !db.is_closed()? {
        db.close()?;
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            "first_name": "John",
            "last_name": "Doe",
            "birth_day": 1234567890,
            "data": [1, 2, 3],
            "body": "A quiet morning in the harbor"
        },
        doc! {
            "first_name": "Jane",
            "last_name": "Doe",
            "birth_day": 1534567890,
            "data": [3, 4, 3],
            "body": "The ferry left at noon"
        },
        doc! {
            "first_name": "Jonas",
            "last_name": "Dean",
            "birth_day": 1734567890,
            "data": [9, 4, 8],
            "body": "Rain over the old town"
        },
    ]
}
