use proc_macro2::TokenTree;
use quote::ToTokens;
use syn::{Expr, parse_quote};

use super::{Rule, RuleKind, expression_position};
use crate::{
    args::Arguments,
    config::GeneratorConfig,
    error::{GenerateError, GenerateResult},
    generated::{Declaration, Generated},
};

/// `stringify_pair!(x + y)` expands to `(x + y, "x + y")`.
///
/// The text is the expression as written when the compiler can hand back
/// its source, otherwise the token rendering of the expression.
pub struct StringifyRule;

impl Rule for StringifyRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Stringify
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        _config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        expression_position(declaration, self.kind())?;
        let expr = args
            .get(0)
            .ok_or_else(|| GenerateError::missing(args.span(), "expected an expression"))?;
        args.expect_at_most(1, self.kind().as_ref())?;

        let source = source_text(expr);
        let pair: Expr = parse_quote!((#expr, #source));
        Ok(vec![pair.into()])
    }
}

fn source_text(expr: &Expr) -> String {
    let tokens: Vec<TokenTree> = expr.to_token_stream().into_iter().collect();
    let written = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first
            .span()
            .join(last.span())
            .unwrap_or_else(|| first.span())
            .source_text(),
        _ => None,
    };
    prefer_written(written, expr)
}

// A span that does not cover the whole expression (no `join` on stable)
// yields partial text, which is rejected by comparing tokens
fn prefer_written(written: Option<String>, expr: &Expr) -> String {
    let rendered = expr.to_token_stream().to_string();
    written
        .filter(|text| {
            syn::parse_str::<Expr>(text)
                .is_ok_and(|parsed| parsed.to_token_stream().to_string() == rendered)
        })
        .unwrap_or(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::TokenStream;
    use quote::quote;
    use syn::Item;

    fn render(args: TokenStream) -> GenerateResult<Vec<Generated>> {
        StringifyRule.render(
            &Declaration::Bare,
            &Arguments::parse(args)?,
            &GeneratorConfig::default(),
        )
    }

    #[test]
    fn test_pairs_value_with_source() {
        let output = render(quote!(x + y)).unwrap();
        let Generated::Expr(Expr::Tuple(tuple)) = &output[0] else {
            panic!("expected a tuple expression");
        };
        assert_eq!(tuple.elems.len(), 2);
        assert_eq!(tuple.elems[0].to_token_stream().to_string(), "x + y");
        assert_eq!(tuple.elems[1].to_token_stream().to_string(), "\"x + y\"");
    }

    #[test]
    fn test_nested_commas_are_one_expression() {
        let output = render(quote!(max(a, b))).unwrap();
        assert!(output[0].to_token_stream().to_string().ends_with("\"max (a , b)\")"));
    }

    #[test]
    fn test_written_text_is_preferred() {
        let expr: Expr = parse_quote!(x + y);
        assert_eq!(prefer_written(Some("x  +  y".into()), &expr), "x  +  y");
        assert_eq!(prefer_written(Some("x + /* sum */ y".into()), &expr), "x + /* sum */ y");
    }

    #[test]
    fn test_partial_or_missing_text_falls_back_to_tokens() {
        let expr: Expr = parse_quote!(x + y);
        assert_eq!(prefer_written(Some("x".into()), &expr), "x + y");
        assert_eq!(prefer_written(None, &expr), "x + y");
        assert_eq!(source_text(&expr), "x + y");
    }

    #[test]
    fn test_missing_expression() {
        let err = render(TokenStream::new()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingArgument { .. }));
    }

    #[test]
    fn test_more_than_one_expression() {
        let err = render(quote!(a, b)).unwrap_err();
        assert!(matches!(err, GenerateError::UnexpectedArgument { .. }));
    }

    #[test]
    fn test_not_attachable_to_items() {
        let item: Item = syn::parse_quote!(fn f() {});
        let err = StringifyRule
            .render(
                &Declaration::from(item),
                &Arguments::parse(quote!(x)).unwrap(),
                &GeneratorConfig::default(),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedTarget { .. }));
    }
}
