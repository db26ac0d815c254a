use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{Expr, Field, Item, spanned::Spanned};

use crate::error::GenerateResult;

/// What a rule is applied to.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// The item an attribute macro is attached to
    Item(Box<Item>),
    /// Expression position: the invocation has no host item
    Bare,
}

impl Declaration {
    pub fn parse(tokens: TokenStream) -> GenerateResult<Self> {
        if tokens.is_empty() {
            return Ok(Self::Bare);
        }
        Ok(Self::Item(Box::new(syn::parse2(tokens)?)))
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(&**item),
            Self::Bare => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Item(item) => item.span(),
            Self::Bare => Span::call_site(),
        }
    }
}

impl From<Item> for Declaration {
    fn from(item: Item) -> Self {
        Self::Item(Box::new(item))
    }
}

/// One declaration produced by a rule.
#[derive(Debug, Clone, derive_more::From)]
pub enum Generated {
    /// Spliced into the host record
    Field(Field),
    /// Emitted after the host item
    Item(Item),
    /// Replaces the invocation
    Expr(Expr),
}

impl ToTokens for Generated {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Field(field) => field.to_tokens(tokens),
            Self::Item(item) => item.to_tokens(tokens),
            Self::Expr(expr) => expr.to_tokens(tokens),
        }
    }
}
