pub mod executor;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod row;

pub use executor::{MySqlExecutor, QueryExecutor};
pub use manager::{DatabaseError, DatabaseManager};
pub use query_builder::SelectQuery;
pub use row::{decode_row, decode_rows, JsonRow};
