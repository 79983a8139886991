//! Mapping from `sqlparser` column data types to split type families.
//!
//! Callers that hold a table's DDL can classify a column here instead of
//! hand-mapping every dialect spelling onto a [`TypeFamily`].

use sqlparser::ast::DataType;

use crate::TypeFamily;

/// Classify a `sqlparser` [`DataType`] into the family used for boundary
/// computation. Types the calculator cannot divide map to
/// [`TypeFamily::Other`].
pub fn classify_sql_data_type(data_type: &DataType) -> TypeFamily {
    use DataType::*;

    match data_type {
        TinyInt(_) | Int2(_) | SmallInt(_) | MediumInt(_) | Int(_) | Int4(_) | Int8(_)
        | Int16 | Int32 | Int64 | Int128 | Int256 | Integer(_) | HugeInt | BigInt(_)
        | Signed | SignedInteger => TypeFamily::Signed,
        TinyIntUnsigned(_) | UTinyInt | Int2Unsigned(_) | SmallIntUnsigned(_) | USmallInt
        | MediumIntUnsigned(_) | IntUnsigned(_) | Int4Unsigned(_) | IntegerUnsigned(_)
        | UHugeInt | UInt8 | UInt16 | UInt32 | UInt64 | UInt128 | UInt256 | BigIntUnsigned(_)
        | UBigInt | Int8Unsigned(_) | Unsigned | UnsignedInteger => TypeFamily::Unsigned,
        Float(_) | Real | Float4 | Float8 | Float32 | Float64 | Double(_) | DoublePrecision => {
            TypeFamily::Float
        }
        Binary(_) | Varbinary(_) | Blob(_) | TinyBlob | MediumBlob | LongBlob | Bytes(_)
        | Bytea => TypeFamily::Binary,
        _ => TypeFamily::Other,
    }
}
