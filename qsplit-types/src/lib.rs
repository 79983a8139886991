//! Value-level types shared by the qsplit crates.
//!
//! This crate does not know about statements or catalogs. It defines what a
//! column's declared type looks like ([`ScalarType`]), the closed set of type
//! families the boundary calculator dispatches on ([`TypeFamily`]), the values
//! carried by bind variables ([`BindValue`]), and the caller-supplied min/max
//! aggregate result ([`MinMaxResult`]).

pub mod min_max;
pub mod scalar;
pub mod sql_types;
pub mod value;

pub use min_max::MinMaxResult;
pub use scalar::{ScalarType, TypeFamily};
pub use sql_types::classify_sql_data_type;
pub use value::{BindValue, BindVariables};
