use std::fmt;
use std::str::FromStr;

use qsplit_result::{Error, Result};
use serde::{Deserialize, Serialize};

/// Declared scalar type of a column, as reported by the store's result
/// metadata.
///
/// The set follows the wire type tags of a MySQL-compatible proxy. Only the
/// [`TypeFamily`] matters for splitting; the concrete tag is kept so callers
/// can pass through what their driver reports without a lossy mapping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Null,
    Int8,
    Int16,
    Int24,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint24,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Decimal,
    Binary,
    VarBinary,
    Blob,
    Char,
    VarChar,
    Text,
    Date,
    Time,
    Datetime,
    Timestamp,
    Bit,
    Enum,
    Set,
    Json,
}

const SCALAR_TYPE_NAMES: &[(ScalarType, &str)] = &[
    (ScalarType::Null, "null"),
    (ScalarType::Int8, "int8"),
    (ScalarType::Int16, "int16"),
    (ScalarType::Int24, "int24"),
    (ScalarType::Int32, "int32"),
    (ScalarType::Int64, "int64"),
    (ScalarType::Uint8, "uint8"),
    (ScalarType::Uint16, "uint16"),
    (ScalarType::Uint24, "uint24"),
    (ScalarType::Uint32, "uint32"),
    (ScalarType::Uint64, "uint64"),
    (ScalarType::Float32, "float32"),
    (ScalarType::Float64, "float64"),
    (ScalarType::Decimal, "decimal"),
    (ScalarType::Binary, "binary"),
    (ScalarType::VarBinary, "varbinary"),
    (ScalarType::Blob, "blob"),
    (ScalarType::Char, "char"),
    (ScalarType::VarChar, "varchar"),
    (ScalarType::Text, "text"),
    (ScalarType::Date, "date"),
    (ScalarType::Time, "time"),
    (ScalarType::Datetime, "datetime"),
    (ScalarType::Timestamp, "timestamp"),
    (ScalarType::Bit, "bit"),
    (ScalarType::Enum, "enum"),
    (ScalarType::Set, "set"),
    (ScalarType::Json, "json"),
];

impl ScalarType {
    /// Family this type belongs to for boundary computation.
    pub const fn family(self) -> TypeFamily {
        use ScalarType::*;
        match self {
            Int8 | Int16 | Int24 | Int32 | Int64 => TypeFamily::Signed,
            Uint8 | Uint16 | Uint24 | Uint32 | Uint64 => TypeFamily::Unsigned,
            Float32 | Float64 => TypeFamily::Float,
            // Character types compare under a collation, not bytewise, so a
            // byte-prefix boundary would not partition them correctly.
            Binary | VarBinary | Blob => TypeFamily::Binary,
            Null | Decimal | Char | VarChar | Text | Date | Time | Datetime | Timestamp | Bit
            | Enum | Set | Json => TypeFamily::Other,
        }
    }

    pub fn name(self) -> &'static str {
        SCALAR_TYPE_NAMES
            .iter()
            .find(|(ty, _)| *ty == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        SCALAR_TYPE_NAMES
            .iter()
            .find(|(_, name)| *name == lowered)
            .map(|(ty, _)| *ty)
            .ok_or_else(|| Error::InvalidArgumentError(format!("unknown scalar type '{s}'")))
    }
}

/// Closed set of column type families the boundary calculator knows how to
/// divide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFamily {
    /// 64-bit signed integers.
    Signed,
    /// 64-bit unsigned integers.
    Unsigned,
    /// 64-bit floating point.
    Float,
    /// Byte strings, split on a hashed 32-bit prefix.
    Binary,
    /// Anything else; never split.
    Other,
}

impl TypeFamily {
    pub const fn type_name(self) -> &'static str {
        match self {
            TypeFamily::Signed => "signed integer",
            TypeFamily::Unsigned => "unsigned integer",
            TypeFamily::Float => "float",
            TypeFamily::Binary => "binary",
            TypeFamily::Other => "other",
        }
    }
}

impl From<ScalarType> for TypeFamily {
    fn from(ty: ScalarType) -> Self {
        ty.family()
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
