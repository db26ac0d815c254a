use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Expr, GenericParam, Item, parse_quote, spanned::Spanned};

use super::{Rule, RuleKind};
use crate::{
    args::Arguments,
    config::GeneratorConfig,
    error::{GenerateError, GenerateResult},
    generated::{Declaration, Generated},
    signature::{FunctionSignature, Parameter},
};

/// Argument forcing a `Self::name` call for associated functions whose
/// signature does not mention `Self`
pub const ASSOCIATED: &str = "associated";

/// `#[future_wrapper]`: emits `<name>_future`, a sibling taking the same
/// parameters and returning a `Completion` settled with the original
/// function's outcome.
///
/// A function returning a `Result` is fallible: its `Err` travels through
/// the completion's failure channel. Any other function is infallible and
/// its completion uses `Infallible` as the error type.
///
/// Methods are called through `self`. Associated functions are called as
/// `Self::name` when their signature names `Self`, or when the rule is
/// invoked as `#[future_wrapper(associated)]`.
pub struct FutureWrapperRule;

impl Rule for FutureWrapperRule {
    fn kind(&self) -> RuleKind {
        RuleKind::FutureWrapper
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        let associated = associated_flag(args)?;
        args.expect_at_most(1, self.kind().as_ref())?;
        let item = declaration.item().ok_or_else(|| {
            GenerateError::unsupported(declaration.span(), "expected a function, found an expression")
        })?;
        let signature = FunctionSignature::extract(item)?;
        Ok(vec![wrapper(&signature, associated, config)?.into()])
    }
}

fn associated_flag(args: &Arguments) -> GenerateResult<bool> {
    match args.get(0) {
        None => Ok(false),
        Some(Expr::Path(path)) if path.path.is_ident(ASSOCIATED) => Ok(true),
        Some(other) => Err(GenerateError::unexpected(
            other.span(),
            format!("`future-wrapper` only accepts `{ASSOCIATED}`"),
        )),
    }
}

fn wrapper(
    signature: &FunctionSignature,
    associated: bool,
    config: &GeneratorConfig,
) -> GenerateResult<Item> {
    let runtime = config.runtime()?;
    let FunctionSignature {
        ident,
        vis,
        generics,
        output,
        ..
    } = signature;

    let wrapper_ident = format_ident!("{}{}", ident, config.wrapper_suffix);
    let where_clause = &generics.where_clause;

    let receiver = signature.receiver.clone().map(|mut receiver| {
        if receiver.reference.is_none() {
            receiver.mutability = None;
        }
        quote!(#receiver,)
    });
    let params = signature
        .params
        .iter()
        .map(|Parameter { ident, ty }| quote!(#ident: #ty));
    let call = call(signature, associated || signature.mentions_self());

    let (completion, settle) = match (signature.fallible, signature.result_arguments()) {
        (true, Some((value, error))) => (
            quote!(#runtime::Completion<#value, #error>),
            quote!(promise.settle(#call)),
        ),
        // Aliases like `io::Result<T>` only expose their parts through `Outcome`
        (true, None) => (
            quote! {
                #runtime::Completion<
                    <#output as #runtime::Outcome>::Value,
                    <#output as #runtime::Outcome>::Error,
                >
            },
            quote!(promise.settle(#runtime::Outcome::into_result(#call))),
        ),
        (false, _) => (
            quote!(#runtime::Completion<#output, ::core::convert::Infallible>),
            quote!(promise.fulfill(#call)),
        ),
    };

    let doc = format!(" Runs `{ident}` and delivers its outcome as a completion.");
    Ok(parse_quote! {
        #[doc = #doc]
        #vis fn #wrapper_ident #generics (#receiver #(#params),*) -> #completion #where_clause {
            #runtime::Completion::new(|promise| #settle)
        }
    })
}

/// The call to the wrapped function, forwarding every parameter.
fn call(signature: &FunctionSignature, associated: bool) -> TokenStream {
    let ident = &signature.ident;
    let args = signature.params.iter().map(|param| &param.ident);
    let turbofish = signature.forwards_generics().then(|| {
        let generic_args = signature
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => Some(&ty.ident),
                GenericParam::Const(constant) => Some(&constant.ident),
                GenericParam::Lifetime(_) => None,
            });
        quote!(::<#(#generic_args),*>)
    });
    match signature.receiver {
        Some(_) => quote!(self.#ident #turbofish (#(#args),*)),
        None if associated => quote!(Self::#ident #turbofish (#(#args),*)),
        None => quote!(#ident #turbofish (#(#args),*)),
    }
}
