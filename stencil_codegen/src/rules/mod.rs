//! Generation rules.
//!
//! Each rule is a stateless renderer turning a [`Declaration`] and its
//! invocation [`Arguments`] into [`Generated`] declarations. Rules are looked
//! up by name through the [`Registry`](crate::registry::Registry).

use proc_macro2::TokenStream;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use syn::{Item, ItemStruct, parse_quote, spanned::Spanned};

use crate::{
    args::Arguments,
    config::GeneratorConfig,
    descriptor::{TypeDescriptor, item_kind},
    error::{GenerateError, GenerateResult},
    generated::{Declaration, Generated},
};

pub mod create_table;
pub mod future_wrapper;
pub mod stringify;
pub mod sync;
pub mod table_name;
pub mod timestamp;

pub use create_table::CreateTableRule;
pub use future_wrapper::FutureWrapperRule;
pub use stringify::StringifyRule;
pub use sync::SyncRule;
pub use table_name::TableNameRule;
pub use timestamp::TimestampRule;

/// Identifiers of the built-in rules, spelled `sync`, `table-name`, ...
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RuleKind {
    Sync,
    TableName,
    CreateTable,
    FutureWrapper,
    Stringify,
    Timestamp,
}

pub trait Rule: Send + Sync {
    fn kind(&self) -> RuleKind;

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>>;

    /// Field attribute consumed by this rule, stripped from the host record
    /// once rendering succeeded.
    fn helper_attribute(&self) -> Option<&'static str> {
        None
    }
}

/// The struct a record rule is attached to, with its descriptor.
pub(crate) fn record(declaration: &Declaration) -> GenerateResult<(&ItemStruct, TypeDescriptor)> {
    match declaration.item() {
        Some(item @ Item::Struct(record)) => Ok((record, TypeDescriptor::extract(item)?)),
        Some(other) => Err(GenerateError::malformed(
            other.span(),
            format!("expected a struct declaration, found {}", item_kind(other)),
        )),
        None => Err(GenerateError::malformed(
            declaration.span(),
            "expected a struct declaration, found an expression",
        )),
    }
}

/// Rejects rules meant for expression position when attached to an item.
pub(crate) fn expression_position(declaration: &Declaration, kind: RuleKind) -> GenerateResult<()> {
    match declaration.item() {
        None => Ok(()),
        Some(item) => Err(GenerateError::unsupported(
            item.span(),
            format!("`{kind}` expands to an expression and cannot be attached to {}", item_kind(item)),
        )),
    }
}

/// `impl<..> Record<..> where .. { body }` honouring the record's generics.
pub(crate) fn inherent_impl(record: &ItemStruct, body: TokenStream) -> Item {
    let ident = &record.ident;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();
    parse_quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #body
        }
    }
}
