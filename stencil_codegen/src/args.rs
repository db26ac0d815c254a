use proc_macro2::{Span, TokenStream};
use syn::{Expr, ExprLit, Lit, Token, parse::Parser, punctuated::Punctuated, spanned::Spanned};

use crate::error::{GenerateError, GenerateResult};

/// The comma separated argument list of a rule invocation, e.g. the
/// `"users", "id"` in `#[create_table("users", "id")]`.
#[derive(Debug, Clone)]
pub struct Arguments {
    exprs: Vec<Expr>,
    span: Span,
}

impl Arguments {
    pub fn parse(tokens: TokenStream) -> GenerateResult<Self> {
        let span = tokens
            .clone()
            .into_iter()
            .next()
            .map(|tt| tt.span())
            .unwrap_or_else(Span::call_site);
        let exprs = Punctuated::<Expr, Token![,]>::parse_terminated.parse2(tokens)?;
        Ok(Self {
            exprs: exprs.into_iter().collect(),
            span,
        })
    }

    pub fn empty() -> Self {
        Self {
            exprs: Vec::new(),
            span: Span::call_site(),
        }
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expr> {
        self.exprs.get(index).map(ungroup)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The string literal at `index`; `what` names it in the error.
    pub fn string_literal(&self, index: usize, what: &str) -> GenerateResult<String> {
        self.optional_string_literal(index, what)?.ok_or_else(|| {
            GenerateError::missing(self.span, format!("expected {what} as a string literal"))
        })
    }

    /// Like [`Arguments::string_literal`], but an absent argument is `None`.
    /// A present argument of the wrong kind is still an error.
    pub fn optional_string_literal(
        &self,
        index: usize,
        what: &str,
    ) -> GenerateResult<Option<String>> {
        match self.get(index) {
            None => Ok(None),
            Some(Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            })) => Ok(Some(lit.value())),
            Some(other) => Err(GenerateError::missing(
                other.span(),
                format!("{what} must be a string literal"),
            )),
        }
    }

    /// Rejects everything past the first `max` arguments.
    pub fn expect_at_most(&self, max: usize, rule: &str) -> GenerateResult<()> {
        match self.exprs.get(max) {
            None => Ok(()),
            Some(extra) => Err(GenerateError::unexpected(
                extra.span(),
                format!(
                    "`{rule}` takes at most {max} argument{}, found {}",
                    if max == 1 { "" } else { "s" },
                    self.exprs.len()
                ),
            )),
        }
    }
}

// Arguments forwarded through `macro_rules!` arrive wrapped in invisible groups
fn ungroup(expr: &Expr) -> &Expr {
    let mut expr = expr;
    while let Expr::Group(group) = expr {
        expr = &group.expr;
    }
    expr
}
