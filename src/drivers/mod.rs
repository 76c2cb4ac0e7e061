mod tokio_postgres;

pub use self::in_memory_test::{InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedCall};
pub use self::tokio_postgres::TokioPostgresDriver;
