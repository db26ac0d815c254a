use quote::quote;
use syn::{Field, Fields, Ident, parse_quote, spanned::Spanned};

use super::{Rule, RuleKind, inherent_impl, record};
use crate::{
    args::Arguments,
    config::GeneratorConfig,
    error::{GenerateError, GenerateResult},
    generated::{Declaration, Generated},
};

/// `#[sync]`: adds a sync status field starting out `Pending` and a
/// `mark_changed` method flipping it to `Changed`.
pub struct SyncRule;

impl Rule for SyncRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Sync
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        args.expect_at_most(0, self.kind().as_ref())?;
        let (record, _) = record(declaration)?;
        if let Fields::Unnamed(fields) = &record.fields {
            return Err(GenerateError::unsupported(
                fields.span(),
                "tuple structs cannot hold a named sync field",
            ));
        }

        let field_ident: Ident = syn::parse_str(&config.sync_field)?;
        if let Some(existing) = record
            .fields
            .iter()
            .find(|field| field.ident.as_ref() == Some(&field_ident))
        {
            return Err(GenerateError::malformed(
                existing.span(),
                format!("`{}` already declares `{field_ident}`", record.ident),
            ));
        }

        let runtime = config.runtime()?;
        let field: Field = parse_quote!(pub #field_ident: #runtime::SyncStatus);
        let methods = inherent_impl(
            record,
            quote! {
                /// Status a freshly created record starts with.
                pub const INITIAL_SYNC_STATUS: #runtime::SyncStatus = #runtime::SyncStatus::Pending;

                /// Flags the record as changed since it was last synced.
                pub fn mark_changed(&mut self) {
                    self.#field_ident = #runtime::SyncStatus::Changed;
                }
            },
        );
        Ok(vec![field.into(), methods.into()])
    }
}
