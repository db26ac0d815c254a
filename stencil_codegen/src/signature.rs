use proc_macro2::{Span, TokenStream, TokenTree};
use quote::{ToTokens, format_ident};
use syn::{
    FnArg, GenericArgument, Generics, Ident, Item, Pat, PathArguments, Receiver, ReturnType, Type,
    Visibility, parse_quote, spanned::Spanned,
};

use crate::{
    descriptor::item_kind,
    error::{GenerateError, GenerateResult},
};

/// A function parameter as the wrapper re-declares it
#[derive(Debug, Clone)]
pub struct Parameter {
    pub ident: Ident,
    pub ty: Type,
}

/// The parts of a function declaration the future wrapper reproduces.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub receiver: Option<Receiver>,
    pub params: Vec<Parameter>,
    /// `()` when the declaration has no return type
    pub output: Type,
    /// Whether `output` is a `Result`, i.e. the function can fail
    pub fallible: bool,
    pub span: Span,
}

impl FunctionSignature {
    pub fn extract(item: &Item) -> GenerateResult<Self> {
        let Item::Fn(item_fn) = item else {
            return Err(GenerateError::unsupported(
                item.span(),
                format!("expected a function, found {}", item_kind(item)),
            ));
        };
        let sig = &item_fn.sig;
        if let Some(asyncness) = &sig.asyncness {
            return Err(GenerateError::unsupported(
                asyncness.span(),
                "async functions already return a future",
            ));
        }
        if let Some(variadic) = &sig.variadic {
            return Err(GenerateError::unsupported(
                variadic.span(),
                "variadic functions cannot be wrapped",
            ));
        }

        let mut receiver = None;
        let mut params = Vec::new();
        for (index, input) in sig.inputs.iter().enumerate() {
            match input {
                FnArg::Receiver(r) => receiver = Some(r.clone()),
                FnArg::Typed(typed) => params.push(Parameter {
                    ident: binding_ident(&typed.pat, index),
                    ty: (*typed.ty).clone(),
                }),
            }
        }

        let output: Type = match &sig.output {
            ReturnType::Default => parse_quote!(()),
            ReturnType::Type(_, ty) => (**ty).clone(),
        };
        let fallible = is_result(&output);

        Ok(Self {
            ident: sig.ident.clone(),
            vis: item_fn.vis.clone(),
            generics: sig.generics.clone(),
            receiver,
            params,
            output,
            fallible,
            span: sig.ident.span(),
        })
    }

    /// Whether the wrapper may name the generic arguments explicitly.
    ///
    /// Type and const parameters can be forwarded with a turbofish unless an
    /// argument is `impl Trait`, which forbids explicit generic arguments.
    pub fn forwards_generics(&self) -> bool {
        let has_type_params = self.generics.type_params().next().is_some()
            || self.generics.const_params().next().is_some();
        has_type_params && !self.params.iter().any(|p| matches!(p.ty, Type::ImplTrait(_)))
    }

    /// Whether this is an associated function without a receiver that names
    /// `Self` in its parameters, return type or bounds, so it must be called
    /// as `Self::name`.
    pub fn mentions_self(&self) -> bool {
        if self.receiver.is_some() {
            return false;
        }
        contains_self(self.output.to_token_stream())
            || contains_self(self.generics.to_token_stream())
            || contains_self(self.generics.where_clause.to_token_stream())
            || self
                .params
                .iter()
                .any(|param| contains_self(param.ty.to_token_stream()))
    }

    /// `(T, E)` when the return type is spelled `Result<T, E>`.
    ///
    /// Single-argument aliases such as `io::Result<T>` give `None`.
    pub fn result_arguments(&self) -> Option<(&Type, &Type)> {
        let Type::Path(path) = &self.output else {
            return None;
        };
        let segment = path.path.segments.last()?;
        if segment.ident != "Result" {
            return None;
        }
        let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
            return None;
        };
        let mut types = arguments.args.iter().map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        });
        match (types.next(), types.next(), types.next()) {
            (Some(Some(value)), Some(Some(error)), None) => Some((value, error)),
            _ => None,
        }
    }
}

fn contains_self(tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => ident == "Self",
        TokenTree::Group(group) => contains_self(group.stream()),
        _ => false,
    })
}

// `mut x` is rebound as `x`; destructuring patterns get a positional name
fn binding_ident(pat: &Pat, index: usize) -> Ident {
    match pat {
        Pat::Ident(pat_ident) if pat_ident.subpat.is_none() => pat_ident.ident.clone(),
        _ => format_ident!("__arg{}", index),
    }
}

fn is_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        Type::Group(group) => is_result(&group.elem),
        Type::Paren(paren) => is_result(&paren.elem),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infallible_function() {
        let item: Item = parse_quote! {
            pub fn add(a: i32, mut b: i32) -> i32 { b += a; b }
        };
        let sig = FunctionSignature::extract(&item).unwrap();
        assert_eq!(sig.ident, "add");
        assert!(!sig.fallible);
        assert!(sig.receiver.is_none());
        let names: Vec<_> = sig.params.iter().map(|p| p.ident.to_string()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(sig.output.to_token_stream().to_string(), "i32");
    }

    #[test]
    fn test_missing_return_type_is_unit() {
        let item: Item = parse_quote!(fn touch() {});
        let sig = FunctionSignature::extract(&item).unwrap();
        assert_eq!(sig.output.to_token_stream().to_string(), "()");
        assert!(!sig.fallible);
    }

    #[test]
    fn test_result_aliases_are_fallible() {
        let item: Item = parse_quote! {
            fn read(path: &str) -> std::io::Result<String> { todo!() }
        };
        assert!(FunctionSignature::extract(&item).unwrap().fallible);

        let item: Item = parse_quote! {
            fn parse(raw: &str) -> Result<u16, ParseIntError> { todo!() }
        };
        assert!(FunctionSignature::extract(&item).unwrap().fallible);
    }

    #[test]
    fn test_receiver_and_patterns() {
        let item: Item = parse_quote! {
            fn apply(&mut self, (x, y): (i32, i32), _: bool) {}
        };
        let sig = FunctionSignature::extract(&item).unwrap();
        assert!(sig.receiver.is_some());
        let names: Vec<_> = sig.params.iter().map(|p| p.ident.to_string()).collect();
        assert_eq!(names, ["__arg1", "__arg2"]);
    }

    #[test]
    fn test_generic_forwarding() {
        let item: Item = parse_quote!(fn parse<T: FromStr>(raw: &str) -> Option<T> { None });
        assert!(FunctionSignature::extract(&item).unwrap().forwards_generics());

        let item: Item = parse_quote!(fn show<T>(value: impl Display, t: T) {});
        assert!(!FunctionSignature::extract(&item).unwrap().forwards_generics());

        let item: Item = parse_quote!(fn first<'a>(items: &'a [u8]) -> &'a u8 { &items[0] });
        assert!(!FunctionSignature::extract(&item).unwrap().forwards_generics());
    }

    #[test]
    fn test_self_in_signature() {
        let item: Item = parse_quote!(fn new(x: u8) -> Self { Self { x } });
        assert!(FunctionSignature::extract(&item).unwrap().mentions_self());

        let item: Item = parse_quote!(fn merge(a: Self, b: Vec<Self>) {});
        assert!(FunctionSignature::extract(&item).unwrap().mentions_self());

        let item: Item = parse_quote!(fn parse<T>(raw: &str) -> Option<T> where T: From<Self> { None });
        assert!(FunctionSignature::extract(&item).unwrap().mentions_self());

        let item: Item = parse_quote!(fn add(a: i32, b: i32) -> i32 { a + b });
        assert!(!FunctionSignature::extract(&item).unwrap().mentions_self());

        let item: Item = parse_quote!(fn with(&self, other: Self) -> Self { other });
        assert!(!FunctionSignature::extract(&item).unwrap().mentions_self());
    }

    #[test]
    fn test_result_arguments() {
        let item: Item = parse_quote!(fn shown(ok: bool) -> Result<impl Display, String> { todo!() });
        let sig = FunctionSignature::extract(&item).unwrap();
        let (value, error) = sig.result_arguments().unwrap();
        assert!(matches!(value, Type::ImplTrait(_)));
        assert_eq!(error.to_token_stream().to_string(), "String");

        let item: Item = parse_quote!(fn read(path: &str) -> std::io::Result<String> { todo!() });
        assert!(FunctionSignature::extract(&item).unwrap().result_arguments().is_none());

        let item: Item = parse_quote!(fn count() -> usize { 0 });
        assert!(FunctionSignature::extract(&item).unwrap().result_arguments().is_none());
    }

    #[test]
    fn test_rejected_targets() {
        let item: Item = parse_quote!(struct User { id: u64 });
        let err = FunctionSignature::extract(&item).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedTarget { .. }));
        assert!(err.to_string().contains("found a struct"));

        let item: Item = parse_quote!(async fn fetch() -> u8 { 0 });
        let err = FunctionSignature::extract(&item).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedTarget { .. }));
    }
}
