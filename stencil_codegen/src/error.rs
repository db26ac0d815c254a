use proc_macro2::{Span, TokenStream};
use thiserror::Error;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Reasons a rule can refuse to generate code for a declaration.
///
/// Every variant is reported back to the compiler as a `compile_error!` at
/// the span it carries. Generation is deterministic, so none of these are
/// worth retrying.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("malformed declaration: {message}")]
    MalformedDeclaration { span: Span, message: String },
    #[error("missing argument: {message}")]
    MissingArgument { span: Span, message: String },
    #[error("unexpected argument: {message}")]
    UnexpectedArgument { span: Span, message: String },
    #[error("unknown rule `{name}`")]
    UnknownRule { span: Span, name: String },
    #[error("unsupported target: {message}")]
    UnsupportedTarget { span: Span, message: String },
    #[error(transparent)]
    Syntax(#[from] syn::Error),
}

impl GenerateError {
    pub fn malformed(span: Span, message: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            span,
            message: message.into(),
        }
    }

    pub fn missing(span: Span, message: impl Into<String>) -> Self {
        Self::MissingArgument {
            span,
            message: message.into(),
        }
    }

    pub fn unexpected(span: Span, message: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            span,
            message: message.into(),
        }
    }

    pub fn unknown_rule(span: Span, name: impl Into<String>) -> Self {
        Self::UnknownRule {
            span,
            name: name.into(),
        }
    }

    pub fn unsupported(span: Span, message: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::MalformedDeclaration { span, .. }
            | Self::MissingArgument { span, .. }
            | Self::UnexpectedArgument { span, .. }
            | Self::UnknownRule { span, .. }
            | Self::UnsupportedTarget { span, .. } => *span,
            Self::Syntax(err) => err.span(),
        }
    }

    pub fn into_syn_error(self) -> syn::Error {
        match self {
            Self::Syntax(err) => err,
            other => syn::Error::new(other.span(), other.to_string()),
        }
    }

    pub fn into_compile_error(self) -> TokenStream {
        self.into_syn_error().into_compile_error()
    }
}
