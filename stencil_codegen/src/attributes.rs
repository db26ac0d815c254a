use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Attribute, Meta};

use crate::type_map::compact_type;

/// Helper attribute read from record fields by the schema rules
pub const COLUMN: &str = "column";

pub fn is_attribute(attr: &Attribute, name: &str) -> bool {
    attr.path().is_ident(name)
}

pub fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| is_attribute(attr, name))
}

pub fn remove_attribute(attrs: &mut Vec<Attribute>, name: &str) {
    attrs.retain(|attr| !is_attribute(attr, name));
}

/// Whether a field carries `#[column(skip)]`.
pub fn column_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|attr| is_attribute(attr, COLUMN)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported column option, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// `derive`, `serde::rename_all`, ... as written on the item
pub fn attribute_name(attr: &Attribute) -> String {
    attr.path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Top level arguments of an attribute, one string per comma separated entry.
///
/// `#[derive(Debug, Clone)]` gives `["Debug", "Clone"]`, `#[doc = "x"]`
/// gives `["\"x\""]` and a bare `#[non_exhaustive]` gives nothing.
pub fn attribute_arguments(attr: &Attribute) -> Vec<String> {
    match &attr.meta {
        Meta::Path(_) => Vec::new(),
        Meta::NameValue(name_value) => {
            vec![compact_type(&name_value.value.to_token_stream().to_string())]
        }
        Meta::List(list) => split_top_level(list.tokens.clone())
            .into_iter()
            .map(|chunk| compact_type(&chunk.to_string()))
            .collect(),
    }
}

// Nested groups are single token trees, so only top level commas split
fn split_top_level(tokens: TokenStream) -> Vec<TokenStream> {
    let mut chunks = Vec::new();
    let mut current = TokenStream::new();
    for tt in tokens {
        match &tt {
            TokenTree::Punct(punct) if punct.as_char() == ',' => {
                chunks.push(std::mem::take(&mut current));
            }
            _ => current.extend([tt]),
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
