//! # Stencil
//!
//! Declarative compile-time code generation. Annotate a declaration with one
//! of the rules below and the generated code is spliced in during
//! compilation:
//!
//! | Macro | Applies to | Generates |
//! |-------|------------|-----------|
//! | [`#[sync]`](sync) | struct | `sync_status` field, `INITIAL_SYNC_STATUS`, `mark_changed` |
//! | [`#[table_name("t")]`](table_name) | struct | `TABLE_NAME` constant |
//! | [`#[create_table("t", "pk")]`](create_table) | struct | `create_table_sql()` |
//! | [`#[future_wrapper]`](future_wrapper) | function | `<name>_future` returning a [`Completion`] |
//! | [`stringify_pair!(expr)`](stringify_pair) | expression | `(expr, "expr")` |
//! | [`timestamp!()`](timestamp) | expression | RFC 3339 compile time literal |
//!
//! This crate holds the runtime types generated code refers to; the rules
//! themselves live in `stencil_codegen`.
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[stencil::create_table("users", "id")]
//! #[stencil::table_name("users")]
//! pub struct User {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! assert_eq!(User::TABLE_NAME, "users");
//! assert_eq!(
//!     User::create_table_sql(),
//!     "CREATE TABLE users (id INTEGER, name TEXT, PRIMARY KEY (id))"
//! );
//!
//! #[stencil::future_wrapper]
//! fn halve(x: u32) -> Result<u32, String> {
//!     if x % 2 == 0 { Ok(x / 2) } else { Err(format!("{x} is odd")) }
//! }
//!
//! assert_eq!(halve_future(8).wait(), Ok(4));
//! assert_eq!(halve_future(3).wait(), Err(Failure::Rejected("3 is odd".into())));
//! ```

pub mod completion;
pub mod prelude;
pub mod sync_status;

pub use completion::{Completion, Failure, Outcome, Promise};
pub use sync_status::SyncStatus;

pub use stencil_macros::{
    create_table, future_wrapper, stringify_pair, sync, table_name, timestamp,
};
