//! Entry points used by the proc-macro crate.
//!
//! A rule renders [`Generated`] declarations; splicing puts them where the
//! compiler expects them: generated fields inside the host struct,
//! generated items right after it, generated expressions in place of the
//! invocation.

use log::debug;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Field, Fields, FieldsNamed, Item, punctuated::Punctuated, spanned::Spanned};

use crate::{
    args::Arguments,
    attributes::remove_attribute,
    config::GeneratorConfig,
    descriptor::item_kind,
    error::{GenerateError, GenerateResult},
    generated::{Declaration, Generated},
    registry::registry,
};

/// Expands `rule` over `item`, reporting failures as `compile_error!`.
///
/// On failure the original item is emitted next to the error so the rest
/// of the crate still sees its declaration. Only the rule's helper
/// attribute is removed from it.
pub fn expand(
    rule: &str,
    args: TokenStream,
    item: TokenStream,
    config: &GeneratorConfig,
) -> TokenStream {
    match try_expand(rule, args, item.clone(), config) {
        Ok(tokens) => tokens,
        Err(err) => {
            let error = err.into_compile_error();
            let item = without_helper_attribute(rule, item);
            quote!(#item #error)
        }
    }
}

pub fn try_expand(
    rule: &str,
    args: TokenStream,
    item: TokenStream,
    config: &GeneratorConfig,
) -> GenerateResult<TokenStream> {
    let renderer = registry().get(rule)?;
    let args = Arguments::parse(args)?;
    let declaration = Declaration::parse(item)?;
    debug!(
        "expanding `{rule}` on {}",
        declaration.item().map(item_kind).unwrap_or("an expression")
    );
    let output = renderer.render(&declaration, &args, config)?;
    splice(declaration, output, renderer.helper_attribute())
}

/// Places rendered output around (or inside) the declaration.
pub fn splice(
    declaration: Declaration,
    output: Vec<Generated>,
    helper_attribute: Option<&str>,
) -> GenerateResult<TokenStream> {
    let mut item = match declaration {
        Declaration::Item(item) => Some(*item),
        Declaration::Bare => None,
    };
    let mut trailing = Vec::new();
    let mut exprs = Vec::new();
    for generated in output {
        match generated {
            Generated::Field(field) => push_field(item.as_mut(), field)?,
            Generated::Item(extra) => trailing.push(extra),
            Generated::Expr(expr) => exprs.push(expr),
        }
    }

    if let (Some(Item::Struct(record)), Some(helper)) = (&mut item, helper_attribute) {
        for field in record.fields.iter_mut() {
            remove_attribute(&mut field.attrs, helper);
        }
    }

    Ok(quote! {
        #item
        #(#trailing)*
        #(#exprs)*
    })
}

fn without_helper_attribute(rule: &str, item: TokenStream) -> TokenStream {
    let Some(helper) = registry()
        .get(rule)
        .ok()
        .and_then(|renderer| renderer.helper_attribute())
    else {
        return item;
    };
    match syn::parse2::<Item>(item.clone()) {
        Ok(Item::Struct(mut record)) => {
            for field in record.fields.iter_mut() {
                remove_attribute(&mut field.attrs, helper);
            }
            record.into_token_stream()
        }
        _ => item,
    }
}

fn push_field(item: Option<&mut Item>, field: Field) -> GenerateResult<()> {
    let Some(Item::Struct(record)) = item else {
        return Err(GenerateError::unsupported(
            field.span(),
            "generated fields can only be added to a struct",
        ));
    };
    if matches!(record.fields, Fields::Unit) {
        record.fields = Fields::Named(FieldsNamed {
            brace_token: Default::default(),
            named: Punctuated::new(),
        });
        record.semi_token = None;
    }
    match &mut record.fields {
        Fields::Named(fields) => {
            fields.named.push(field);
            Ok(())
        }
        other => Err(GenerateError::unsupported(
            other.span(),
            "tuple structs cannot hold named fields",
        )),
    }
}
