use std::{collections::HashMap, sync::LazyLock};

use proc_macro2::Span;

use crate::{
    error::{GenerateError, GenerateResult},
    rules::{
        CreateTableRule, FutureWrapperRule, Rule, RuleKind, StringifyRule, SyncRule,
        TableNameRule, TimestampRule,
    },
};

static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// The process-wide registry of built-in rules.
pub fn registry() -> &'static Registry {
    &BUILTIN
}

/// Maps rule names to their renderers. Populated once, read-only after.
pub struct Registry {
    rules: HashMap<&'static str, Box<dyn Rule>>,
}

impl Registry {
    pub fn builtin() -> Self {
        let mut registry = Self {
            rules: HashMap::new(),
        };
        registry.insert(Box::new(SyncRule));
        registry.insert(Box::new(TableNameRule));
        registry.insert(Box::new(CreateTableRule));
        registry.insert(Box::new(FutureWrapperRule));
        registry.insert(Box::new(StringifyRule));
        registry.insert(Box::new(TimestampRule));
        registry
    }

    fn insert(&mut self, rule: Box<dyn Rule>) {
        let name: &'static str = rule.kind().into();
        let previous = self.rules.insert(name, rule);
        debug_assert!(previous.is_none(), "rule `{name}` registered twice");
    }

    pub fn get(&self, name: &str) -> GenerateResult<&dyn Rule> {
        self.rules
            .get(name)
            .map(|rule| &**rule)
            .ok_or_else(|| GenerateError::unknown_rule(Span::call_site(), name))
    }

    pub fn dispatch(&self, kind: RuleKind) -> GenerateResult<&dyn Rule> {
        self.get(kind.as_ref())
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.rules.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
