mod row;

pub use row::{QueryResult, RawQueryResult, Row};
