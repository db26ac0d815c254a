use log::warn;
use quote::quote;

use super::{Rule, RuleKind, inherent_impl, record};
use crate::{
    args::Arguments,
    attributes::COLUMN,
    config::GeneratorConfig,
    descriptor::TypeDescriptor,
    error::GenerateResult,
    generated::{Declaration, Generated},
};

/// `#[create_table("users", "id")]`: emits `create_table_sql()` returning the
/// record's `CREATE TABLE` statement, one column per stored field.
pub struct CreateTableRule;

impl CreateTableRule {
    /// `CREATE TABLE <table> (<field> <TYPE>, ..[, PRIMARY KEY (<pk>)])`
    ///
    /// Columns follow the descriptor's field order. The primary key is
    /// written as given and not checked against the columns.
    pub fn schema(descriptor: &TypeDescriptor, table: &str, primary_key: Option<&str>) -> String {
        let mut clauses: Vec<String> = descriptor
            .fields()
            .iter()
            .map(|field| format!("{} {}", field.name(), field.column_type()))
            .collect();
        if let Some(primary_key) = primary_key {
            clauses.push(format!("PRIMARY KEY ({primary_key})"));
        }
        format!("CREATE TABLE {table} ({})", clauses.join(", "))
    }
}

impl Rule for CreateTableRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CreateTable
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        _config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        let (record, descriptor) = record(declaration)?;
        let table = args.string_literal(0, "a table name")?;
        let primary_key = args.optional_string_literal(1, "a primary key column")?;
        args.expect_at_most(2, self.kind().as_ref())?;

        if descriptor.fields().is_empty() {
            warn!("`{}` has no stored fields, table `{table}` gets no columns", descriptor.type_name());
        }
        if let Some(pk) = &primary_key
            && descriptor.field(pk).is_none()
        {
            warn!("primary key `{pk}` is not a column of `{}`", descriptor.type_name());
        }

        let sql = Self::schema(&descriptor, &table, primary_key.as_deref());
        let method = inherent_impl(
            record,
            quote! {
                /// `CREATE TABLE` statement for this record.
                pub const fn create_table_sql() -> &'static str {
                    #sql
                }
            },
        );
        Ok(vec![method.into()])
    }

    fn helper_attribute(&self) -> Option<&'static str> {
        Some(COLUMN)
    }
}
