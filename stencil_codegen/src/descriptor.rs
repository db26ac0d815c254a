//! Structural descriptors extracted from record declarations.
//!
//! A [`TypeDescriptor`] is the host-agnostic input of the schema rules: the
//! record's name, its stored fields in declaration order, and its outer
//! attributes. Descriptors are usually extracted from a `syn::Item`, but
//! they are plain data and can equally be built or deserialized by another
//! host.

use std::collections::BTreeMap;

use quote::ToTokens;
use serde::{Deserialize, Serialize};
use syn::{Field, Item, ItemStruct, Type, ext::IdentExt, spanned::Spanned, visit::Visit};

use crate::{
    attributes::{attribute_arguments, attribute_name, column_skipped},
    error::{GenerateError, GenerateResult},
    type_map::{self, ColumnType, compact_type},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    declared_type: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn column_type(&self) -> ColumnType {
        type_map::map(&self.declared_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    type_name: String,
    fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Vec<String>>,
}

impl TypeDescriptor {
    pub fn new(
        type_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        attributes: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
            attributes,
        }
    }

    /// Reads the descriptor of a struct declaration.
    ///
    /// Named fields are kept in declaration order. Tuple fields,
    /// `PhantomData` markers and fields marked `#[column(skip)]` are not
    /// stored columns and are left out. Anything but a struct is a
    /// [`GenerateError::MalformedDeclaration`].
    pub fn extract(item: &Item) -> GenerateResult<Self> {
        let Item::Struct(item_struct) = item else {
            return Err(GenerateError::malformed(
                item.span(),
                format!("expected a struct declaration, found {}", item_kind(item)),
            ));
        };
        let mut visitor = RecordVisitor::default();
        visitor.visit_item_struct(item_struct);
        visitor.finish()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Default)]
struct RecordVisitor {
    descriptor: Option<TypeDescriptor>,
    errors: Vec<syn::Error>,
}

impl<'ast> Visit<'ast> for RecordVisitor {
    fn visit_item_struct(&mut self, i: &'ast ItemStruct) {
        let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for attr in i.attrs.iter().filter(|attr| !attr.path().is_ident("doc")) {
            attributes
                .entry(attribute_name(attr))
                .or_default()
                .extend(attribute_arguments(attr));
        }
        self.descriptor = Some(TypeDescriptor::new(
            i.ident.unraw().to_string(),
            Vec::new(),
            attributes,
        ));
        for field in &i.fields {
            self.visit_field(field);
        }
    }

    fn visit_field(&mut self, i: &'ast Field) {
        let Some(ident) = &i.ident else {
            return;
        };
        match column_skipped(&i.attrs) {
            Ok(true) => return,
            Ok(false) => {}
            Err(err) => {
                self.errors.push(err);
                return;
            }
        }
        if is_phantom(&i.ty) {
            return;
        }
        if let Some(descriptor) = &mut self.descriptor {
            descriptor.fields.push(FieldDescriptor::new(
                ident.unraw().to_string(),
                compact_type(&i.ty.to_token_stream().to_string()),
            ));
        }
    }
}

impl RecordVisitor {
    fn finish(self) -> GenerateResult<TypeDescriptor> {
        let mut errors = self.errors.into_iter();
        if let Some(mut first) = errors.next() {
            for err in errors {
                first.combine(err);
            }
            return Err(first.into());
        }
        self.descriptor.ok_or_else(|| {
            GenerateError::malformed(proc_macro2::Span::call_site(), "no struct was visited")
        })
    }
}

fn is_phantom(ty: &Type) -> bool {
    matches!(ty, Type::Path(path)
        if path.path.segments.last().is_some_and(|segment| segment.ident == "PhantomData"))
}

/// Human readable item kind for diagnostics
pub(crate) fn item_kind(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "a const item",
        Item::Enum(_) => "an enum",
        Item::ExternCrate(_) => "an extern crate item",
        Item::Fn(_) => "a function",
        Item::ForeignMod(_) => "an extern block",
        Item::Impl(_) => "an impl block",
        Item::Macro(_) => "a macro invocation",
        Item::Mod(_) => "a module",
        Item::Static(_) => "a static item",
        Item::Struct(_) => "a struct",
        Item::Trait(_) => "a trait",
        Item::TraitAlias(_) => "a trait alias",
        Item::Type(_) => "a type alias",
        Item::Union(_) => "a union",
        Item::Use(_) => "a use declaration",
        _ => "an unsupported item",
    }
}
