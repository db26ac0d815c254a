//! Common imports.
//!
//! ```rust
//! use stencil::prelude::*;
//! ```
//!
//! Brings the runtime types ([`Completion`], [`Promise`], [`Failure`],
//! [`Outcome`], [`SyncStatus`]) and every generation macro into scope.

pub use crate::completion::{Completion, Failure, Outcome, Promise};
pub use crate::sync_status::SyncStatus;

pub use stencil_macros::{
    create_table, future_wrapper, stringify_pair, sync, table_name, timestamp,
};
