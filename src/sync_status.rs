use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Sync state of a record, added to structs by `#[sync]`.
///
/// Records start out [`Pending`](SyncStatus::Pending) and move to
/// [`Changed`](SyncStatus::Changed) when modified. The textual forms are
/// `"pending"` and `"changed"`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Pending,
    Changed,
}

impl SyncStatus {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_changed(self) -> bool {
        self == Self::Changed
    }
}
