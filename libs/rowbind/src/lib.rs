//! SQL-first row mapping.
//!
//! Turns executor result sets into `RowMap`s, JSON, or typed records, and
//! typed records into parameterized INSERTs, driven by `#[db("...")]` field
//! annotations:
//!
//! ```ignore
//! #[derive(Record, Default)]
//! struct User {
//!     #[db("users.id")]
//!     id: i64,
//!     #[db("users.email")]
//!     email: String,
//! }
//!
//! let rows = rowbind::query_maps(&cancel, &db, "SELECT * FROM users WHERE active = $1", &[Value::Bool(true)]).await?;
//! let mut users: Vec<User> = Vec::new();
//! rowbind::query_records(&cancel, &db, "SELECT * FROM users", &mut users, &[]).await?;
//! rowbind::insert_record(&cancel, &db, "users", &users[0]).await?;
//! ```
//!
//! Statement execution is left to an `Executor` implementation.

// Lets `#[derive(Record)]` expand to `::rowbind::...` inside this crate too.
extern crate self as rowbind;

pub mod config;
pub mod convert;
pub mod error;
pub mod executor;
pub mod extract;
pub mod insert;
pub mod mapper;
pub mod record;
pub mod resolve;
pub mod row_map;
pub mod tag;
pub mod value;

pub use config::{CollisionPolicy, MapperConfig};
pub use convert::{FromValue, ToValue};
pub use error::{DriverError, ErrorKind, MapError};
pub use executor::{ExecSummary, Executor, ResultSet};
pub use mapper::{insert_record, query_json, query_maps, query_records, Mapper};
pub use record::Record;
pub use row_map::RowMap;
pub use rowbind_derive::Record;
pub use value::Value;
