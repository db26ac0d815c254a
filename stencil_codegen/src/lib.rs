//! Code generation engine behind the `stencil` macros.
//!
//! Generation runs in two stages over an explicit intermediate
//! representation:
//!
//! ```text
//! syn::Item ──extract──▶ TypeDescriptor / FunctionSignature
//!                                  │
//!       Registry::get(name) ──▶ Rule::render(declaration, arguments)
//!                                  │
//!                           Vec<Generated> ──splice──▶ TokenStream
//! ```
//!
//! Nothing here depends on `proc_macro` itself, so every rule can be
//! exercised from ordinary unit tests and reused by other hosts.
//!
//! ```
//! use quote::quote;
//! use stencil_codegen::{GeneratorConfig, try_expand};
//!
//! let tokens = try_expand(
//!     "create-table",
//!     quote!("users", "id"),
//!     quote!(struct User { id: u64, name: String }),
//!     &GeneratorConfig::default(),
//! )
//! .unwrap();
//! assert!(tokens
//!     .to_string()
//!     .contains("CREATE TABLE users (id INTEGER, name TEXT, PRIMARY KEY (id))"));
//! ```

pub mod args;
pub mod attributes;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generated;
pub mod host;
pub mod registry;
pub mod rules;
pub mod signature;
pub mod type_map;

pub use args::Arguments;
pub use config::GeneratorConfig;
pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use error::{GenerateError, GenerateResult};
pub use generated::{Declaration, Generated};
pub use host::{expand, splice, try_expand};
pub use registry::{Registry, registry};
pub use rules::{Rule, RuleKind};
pub use signature::FunctionSignature;
pub use type_map::ColumnType;
