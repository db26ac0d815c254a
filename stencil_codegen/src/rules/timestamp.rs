use chrono::{DateTime, SecondsFormat, Utc};
use syn::{Expr, parse_quote};

use super::{Rule, RuleKind, expression_position};
use crate::{
    args::Arguments,
    config::GeneratorConfig,
    error::GenerateResult,
    generated::{Declaration, Generated},
};

/// `timestamp!()` expands to a string literal of the generation instant,
/// e.g. `"2026-10-19T08:30:00Z"`.
///
/// The instant is taken when the code is generated, not when the generated
/// program runs, so builds embedding it are only reproducible when
/// `SOURCE_DATE_EPOCH` pins it.
pub struct TimestampRule;

impl TimestampRule {
    /// RFC 3339, UTC, second precision
    pub fn format(instant: DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Rule for TimestampRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Timestamp
    }

    fn render(
        &self,
        declaration: &Declaration,
        args: &Arguments,
        config: &GeneratorConfig,
    ) -> GenerateResult<Vec<Generated>> {
        expression_position(declaration, self.kind())?;
        args.expect_at_most(0, self.kind().as_ref())?;

        let stamp = Self::format(config.generation_instant());
        let literal: Expr = parse_quote!(#stamp);
        Ok(vec![literal.into()])
    }
}
