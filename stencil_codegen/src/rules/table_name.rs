use quote::quote;

use super::{Rule, RuleKind, inherent_impl, record};
use crate::{
    args::Arguments,
    config::GeneratorConfig,
    error::GenerateResult,
    generated::{Declaration, Generated},
};

/// `#[table_name("users")]`: binds the record's table name to `TABLE_NAME`.
pub struct TableNameRule;

impl Rule for TableNameRule {
    fn kind(&self) -> RuleKind {
        RuleKind::TableName
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        _config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        let (record, _) = record(declaration)?;
        let table = args.string_literal(0, "a table name")?;
        args.expect_at_most(1, self.kind().as_ref())?;

        let constant = inherent_impl(
            record,
            quote! {
                pub const TABLE_NAME: &'static str = #table;
            },
        );
        Ok(vec![constant.into()])
    }
}
