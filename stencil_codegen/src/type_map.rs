//! Maps declared field types onto storage column types.
//!
//! The mapping works on the textual form of a type so it serves both types
//! read from a `syn` tree and types supplied by an external host. It is
//! total: anything unrecognised is stored as `TEXT`.

use log::trace;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Blob,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Maps a declared type such as `u64`, `Option<String>` or `Double` to its
/// column type.
pub fn map(declared: &str) -> ColumnType {
    let normalised = compact_type(declared);
    classify(&normalised).unwrap_or_else(|| {
        trace!("no column mapping for `{normalised}`, storing as TEXT");
        ColumnType::Text
    })
}

fn classify(ty: &str) -> Option<ColumnType> {
    let ty = strip_reference(ty);
    if let Some(inner) = generic_argument(ty, &["Option", "Box"]) {
        return classify(inner);
    }
    if is_blob(ty) {
        return Some(ColumnType::Blob);
    }
    match last_segment(ty) {
        "String" | "str" | "char" | "Character" | "Substring" => Some(ColumnType::Text),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
        | "usize" | "bool" | "Int" | "Int8" | "Int16" | "Int32" | "Int64" | "UInt" | "UInt8"
        | "UInt16" | "UInt32" | "UInt64" | "Bool" => Some(ColumnType::Integer),
        "f32" | "f64" | "Float" | "Double" | "Float32" | "Float64" => Some(ColumnType::Real),
        _ => None,
    }
}

fn is_blob(ty: &str) -> bool {
    if generic_argument(ty, &["Vec"]).is_some_and(|inner| inner == "u8") {
        return true;
    }
    if ty == "[u8]" || ty == "[UInt8]" || (ty.starts_with("[u8;") && ty.ends_with(']')) {
        return true;
    }
    matches!(last_segment(ty), "Bytes" | "BytesMut" | "Data")
}

fn strip_reference(mut ty: &str) -> &str {
    loop {
        if let Some(rest) = ty.strip_prefix('&') {
            ty = rest;
        } else if let Some(rest) = ty.strip_prefix('\'') {
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            ty = rest[end..].trim_start();
        } else if let Some(rest) = ty.strip_prefix("mut")
            && !rest.starts_with(is_word)
        {
            ty = rest.trim_start();
        } else {
            return ty;
        }
    }
}

/// The single generic argument of `Wrapper<..>` when `ty` is one of `wrappers`.
fn generic_argument<'a>(ty: &'a str, wrappers: &[&str]) -> Option<&'a str> {
    let open = ty.find('<')?;
    let inner = ty[open + 1..].strip_suffix('>')?;
    wrappers
        .contains(&last_segment(&ty[..open]))
        .then_some(inner)
}

fn last_segment(ty: &str) -> &str {
    let head = ty.split('<').next().unwrap_or(ty);
    head.rsplit("::").next().unwrap_or(head)
}

/// Renders a type's tokens without the spacing `proc_macro2` inserts,
/// keeping a single space only between two word characters.
pub(crate) fn compact_type(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && is_word(c) && out.chars().next_back().is_some_and(is_word) {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cross_language_names() {
        assert_eq!(map("Int").as_str(), "INTEGER");
        assert_eq!(map("String").as_str(), "TEXT");
        assert_eq!(map("Double").as_str(), "REAL");
        assert_eq!(map("UnknownXYZ").as_str(), "TEXT");
        assert_eq!(map("Bool"), ColumnType::Integer);
        assert_eq!(map("Data"), ColumnType::Blob);
        assert_eq!(map("[UInt8]"), ColumnType::Blob);
    }

    #[test]
    fn test_rust_primitives() {
        for ty in ["i8", "i32", "u64", "usize", "bool", "i128"] {
            assert_eq!(map(ty), ColumnType::Integer, "{ty}");
        }
        assert_eq!(map("f32"), ColumnType::Real);
        assert_eq!(map("f64"), ColumnType::Real);
        assert_eq!(map("char"), ColumnType::Text);
    }

    #[test]
    fn test_wrappers_and_paths() {
        assert_eq!(map("Option<i64>"), ColumnType::Integer);
        assert_eq!(map("Option < Vec < u8 > >"), ColumnType::Blob);
        assert_eq!(map("std::option::Option<f64>"), ColumnType::Real);
        assert_eq!(map("Box<str>"), ColumnType::Text);
        assert_eq!(map("std :: string :: String"), ColumnType::Text);
        assert_eq!(map("&'static str"), ColumnType::Text);
        assert_eq!(map("& 'a mut [u8]"), ColumnType::Blob);
        assert_eq!(map("[u8 ; 32]"), ColumnType::Blob);
        assert_eq!(map("bytes::Bytes"), ColumnType::Blob);
    }

    #[test]
    fn test_unrecognised_types_fall_back_to_text() {
        assert_eq!(map("Vec<String>"), ColumnType::Text);
        assert_eq!(map("Option<Uuid>"), ColumnType::Text);
        assert_eq!(map("HashMap<String, i64>"), ColumnType::Text);
        assert_eq!(map(""), ColumnType::Text);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for ty in ["u8", "Double", "Vec<u8>", "Whatever"] {
            assert_eq!(map(ty), map(ty));
        }
    }

    #[test]
    fn test_column_type_names() {
        let names: Vec<_> = ColumnType::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["TEXT", "INTEGER", "REAL", "BLOB"]);
        assert_eq!("REAL".parse::<ColumnType>().unwrap(), ColumnType::Real);
    }

    #[test]
    fn test_compact_type() {
        assert_eq!(compact_type("Vec < u8 >"), "Vec<u8>");
        assert_eq!(compact_type("& 'a mut T"), "&'a mut T");
        assert_eq!(compact_type("[u8 ; 4]"), "[u8;4]");
        assert_eq!(compact_type("std :: collections :: HashMap < K , V >"), "std::collections::HashMap<K,V>");
    }
}
