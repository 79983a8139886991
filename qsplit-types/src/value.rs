use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Bind-variable mapping: variable name (without the leading `:`) to value.
pub type BindVariables = FxHashMap<String, BindValue>;

/// Typed value bound to a named placeholder at execution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
}

impl BindValue {
    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null)
    }

    /// Parse a loosely typed literal: integers first, then floats, then
    /// `true`/`false`/`null`, falling back to text.
    pub fn from_literal(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return BindValue::Int64(v);
        }
        if let Ok(v) = trimmed.parse::<u64>() {
            return BindValue::UInt64(v);
        }
        if trimmed.contains(['.', 'e', 'E'])
            && let Ok(v) = trimmed.parse::<f64>()
        {
            return BindValue::Float64(v);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => BindValue::Bool(true),
            "false" => BindValue::Bool(false),
            "null" => BindValue::Null,
            _ => BindValue::Text(text.to_string()),
        }
    }
}

macro_rules! impl_from_for_bind_value {
    ($variant:ident, $($t:ty),*) => {
        $(
            impl From<$t> for BindValue {
                fn from(v: $t) -> Self {
                    BindValue::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_bind_value!(Int64, i8, i16, i32, i64);
impl_from_for_bind_value!(UInt64, u8, u16, u32, u64);
impl_from_for_bind_value!(Float64, f32, f64);
impl_from_for_bind_value!(Bytes, Vec<u8>);
impl_from_for_bind_value!(Text, String);
impl_from_for_bind_value!(Bool, bool);

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<&[u8]> for BindValue {
    fn from(v: &[u8]) -> Self {
        BindValue::Bytes(v.to_vec())
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Null => f.write_str("NULL"),
            BindValue::Int64(v) => write!(f, "{v}"),
            BindValue::UInt64(v) => write!(f, "{v}"),
            BindValue::Float64(v) => write!(f, "{v}"),
            BindValue::Bytes(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            BindValue::Text(s) => write!(f, "'{s}'"),
            BindValue::Bool(v) => write!(f, "{v}"),
        }
    }
}
