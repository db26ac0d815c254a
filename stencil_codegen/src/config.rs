//! Generator configuration.
//!
//! The macros build a [`GeneratorConfig`] from the environment on every
//! expansion; library users and tests construct one with the builder.
//!
//! ```
//! use stencil_codegen::GeneratorConfig;
//!
//! let config = GeneratorConfig::builder()
//!     .wrapper_suffix("_async")
//!     .build();
//! assert_eq!(config.sync_field, "sync_status");
//! ```

use chrono::{DateTime, Utc};
use log::warn;
use typed_builder::TypedBuilder;

use crate::error::GenerateResult;

/// Environment variable honoured for reproducible timestamps.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct GeneratorConfig {
    /// Fixed generation instant; `None` reads the clock at expansion time
    #[builder(default, setter(strip_option))]
    pub generated_at: Option<DateTime<Utc>>,

    /// Appended to a function's name to name its future wrapper
    #[builder(default = String::from("_future"), setter(into))]
    pub wrapper_suffix: String,

    /// Name of the field injected by the sync rule
    #[builder(default = String::from("sync_status"), setter(into))]
    pub sync_field: String,

    /// Path generated code uses to reach the runtime types
    #[builder(default = String::from("::stencil"), setter(into))]
    pub runtime_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GeneratorConfig {
    /// Defaults, with the generation instant pinned by `SOURCE_DATE_EPOCH`
    /// when it holds a valid unix timestamp.
    pub fn from_env() -> Self {
        let generated_at = std::env::var(SOURCE_DATE_EPOCH)
            .ok()
            .and_then(|raw| parse_epoch(&raw));
        Self {
            generated_at,
            ..Self::default()
        }
    }

    pub fn generation_instant(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now)
    }

    pub(crate) fn runtime(&self) -> GenerateResult<syn::Path> {
        Ok(syn::parse_str(&self.runtime_path)?)
    }
}

fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let instant = raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));
    if instant.is_none() {
        warn!("ignoring {SOURCE_DATE_EPOCH}={raw:?}: not a unix timestamp");
    }
    instant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.generated_at, None);
        assert_eq!(config.wrapper_suffix, "_future");
        assert_eq!(config.sync_field, "sync_status");
        assert_eq!(config.runtime_path, "::stencil");
    }

    #[test]
    fn test_builder_overrides() {
        let instant = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let config = GeneratorConfig::builder()
            .generated_at(instant)
            .runtime_path("crate::runtime")
            .build();
        assert_eq!(config.generation_instant(), instant);
        let path = config.runtime().unwrap();
        assert_eq!(path.segments.len(), 2);
    }

    #[test]
    fn test_parse_epoch() {
        let instant = parse_epoch("0").unwrap();
        assert_eq!(instant.to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert_eq!(parse_epoch(" 86400\n").unwrap().timestamp(), 86_400);
        assert!(parse_epoch("yesterday").is_none());
        assert!(parse_epoch("").is_none());
    }

    #[test]
    fn test_invalid_runtime_path() {
        let config = GeneratorConfig::builder().runtime_path("not a path").build();
        assert!(config.runtime().is_err());
    }
}
