//! Split boundary computation.
//!
//! The numeric families share one routine, [`numeric_boundaries`], generic
//! over [`SplitScalar`]. Each implementation keeps its own overflow and
//! rounding rules: `i64` widens to `i128` before subtracting, `u64` refuses
//! inverted ranges instead of wrapping, and `f64` rejects non-finite input.
//!
//! Binary columns do not consult min/max at all; see [`binary_boundaries`].

use std::fmt;

use qsplit_result::{Error, Result};
use qsplit_types::{BindValue, MinMaxResult, TypeFamily};

/// Size of the key space assumed for binary split columns: a 32-bit prefix.
pub const BINARY_KEYSPACE: u64 = 1 << 32;

/// Largest split count the boundary calculator will materialize.
pub const MAX_SPLIT_COUNT: u64 = 1 << 20;

/// Interior boundaries plus the shared per-split row estimate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitBoundaries {
    /// Strictly increasing interior boundary values.
    pub values: Vec<BindValue>,
    /// Estimated rows per split. Zero when no boundaries were produced.
    pub row_count: u64,
}

impl SplitBoundaries {
    /// No boundaries: the statement is returned as a single split.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Scalar representation the interval routine can divide.
pub trait SplitScalar: Copy + PartialOrd + fmt::Display {
    const TYPE_NAME: &'static str;

    /// Parse a min/max cell from its textual form.
    fn parse_text(text: &str) -> Result<Self>;

    /// `(max - min) / parts`, or `None` when `max < min`. `parts >= 2`.
    fn interval(min: Self, max: Self, parts: u64) -> Option<Self>;

    fn is_zero(self) -> bool;

    /// `min + interval * step`.
    fn offset(min: Self, interval: Self, step: u64) -> Self;

    fn row_estimate(interval: Self) -> u64;

    fn into_bind_value(self) -> BindValue;
}

impl SplitScalar for i64 {
    const TYPE_NAME: &'static str = "signed integer";

    fn parse_text(text: &str) -> Result<Self> {
        text.trim()
            .parse::<i64>()
            .map_err(|err| Error::numeric_parse(Self::TYPE_NAME, text, err))
    }

    fn interval(min: Self, max: Self, parts: u64) -> Option<Self> {
        if max < min {
            return None;
        }
        let width = i128::from(max) - i128::from(min);
        // width < 2^64 and parts >= 2, so the quotient fits in i64.
        Some((width / i128::from(parts)) as i64)
    }

    fn is_zero(self) -> bool {
        self == 0
    }

    fn offset(min: Self, interval: Self, step: u64) -> Self {
        (i128::from(min) + i128::from(interval) * i128::from(step)) as i64
    }

    fn row_estimate(interval: Self) -> u64 {
        interval.unsigned_abs()
    }

    fn into_bind_value(self) -> BindValue {
        BindValue::Int64(self)
    }
}

impl SplitScalar for u64 {
    const TYPE_NAME: &'static str = "unsigned integer";

    fn parse_text(text: &str) -> Result<Self> {
        text.trim()
            .parse::<u64>()
            .map_err(|err| Error::numeric_parse(Self::TYPE_NAME, text, err))
    }

    fn interval(min: Self, max: Self, parts: u64) -> Option<Self> {
        max.checked_sub(min).map(|width| width / parts)
    }

    fn is_zero(self) -> bool {
        self == 0
    }

    fn offset(min: Self, interval: Self, step: u64) -> Self {
        // step < parts, so the result stays within [min, max].
        min + interval * step
    }

    fn row_estimate(interval: Self) -> u64 {
        interval
    }

    fn into_bind_value(self) -> BindValue {
        BindValue::UInt64(self)
    }
}

impl SplitScalar for f64 {
    const TYPE_NAME: &'static str = "float";

    fn parse_text(text: &str) -> Result<Self> {
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(|err| Error::numeric_parse(Self::TYPE_NAME, text, err))?;
        if !value.is_finite() {
            return Err(Error::numeric_parse(
                Self::TYPE_NAME,
                text,
                "value is not finite",
            ));
        }
        Ok(value)
    }

    fn interval(min: Self, max: Self, parts: u64) -> Option<Self> {
        if max < min {
            return None;
        }
        let parts = parts as f64;
        let interval = (max - min) / parts;
        if interval.is_finite() {
            Some(interval)
        } else {
            // max - min overflowed; divide first.
            Some(max / parts - min / parts)
        }
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }

    fn offset(min: Self, interval: Self, step: u64) -> Self {
        min + interval * step as f64
    }

    fn row_estimate(interval: Self) -> u64 {
        interval as u64
    }

    fn into_bind_value(self) -> BindValue {
        BindValue::Float64(self)
    }
}

/// Compute interior split boundaries for a column of family `family`.
///
/// `split_count` values below 2 produce no boundaries. For numeric families,
/// a missing, multi-row, or NULL min/max result also produces no boundaries,
/// while a range too narrow for `split_count` is [`Error::RangeTooSmall`].
pub fn compute_boundaries(
    family: TypeFamily,
    min_max: Option<&MinMaxResult>,
    split_count: u64,
) -> Result<SplitBoundaries> {
    if split_count <= 1 {
        return Ok(SplitBoundaries::none());
    }
    let boundaries = match family {
        TypeFamily::Signed => numeric_boundaries::<i64>(min_max, split_count)?,
        TypeFamily::Unsigned => numeric_boundaries::<u64>(min_max, split_count)?,
        TypeFamily::Float => numeric_boundaries::<f64>(min_max, split_count)?,
        TypeFamily::Binary => binary_boundaries(split_count)?,
        TypeFamily::Other => SplitBoundaries::none(),
    };
    tracing::debug!(
        %family,
        split_count,
        boundaries = boundaries.len(),
        row_count = boundaries.row_count,
        "computed split boundaries"
    );
    Ok(boundaries)
}

/// Divide `[min, max]` into `split_count` equal sub-ranges of `T`.
pub fn numeric_boundaries<T: SplitScalar>(
    min_max: Option<&MinMaxResult>,
    split_count: u64,
) -> Result<SplitBoundaries> {
    let Some((min_text, max_text)) = min_max.and_then(MinMaxResult::bounds) else {
        return Ok(SplitBoundaries::none());
    };
    let min = T::parse_text(min_text)?;
    let max = T::parse_text(max_text)?;

    let interval = T::interval(min, max, split_count).ok_or_else(|| {
        Error::InvalidArgumentError(format!(
            "{} range is inverted: min {min} exceeds max {max}",
            T::TYPE_NAME
        ))
    })?;
    if interval.is_zero() {
        return Err(Error::range_too_small(min, max, split_count));
    }

    let mut values = boundary_buffer(split_count)?;
    let mut previous = min;
    for step in 1..split_count {
        let boundary = T::offset(min, interval, step);
        // Only reachable through float rounding on a very narrow range.
        if boundary <= previous {
            return Err(Error::range_too_small(min, max, split_count));
        }
        values.push(boundary.into_bind_value());
        previous = boundary;
    }

    Ok(SplitBoundaries {
        values,
        row_count: T::row_estimate(interval),
    })
}

/// Boundaries for byte-string split columns.
///
/// The column is assumed to hold uniformly hashed keys, so the domain is
/// treated as a 32-bit prefix space cut into equal slices, each boundary being
/// the big-endian 4-byte prefix `split_size * i`. This is a coarse
/// approximation: skewed or unhashed keys produce unbalanced splits, though
/// never overlapping or missing ones.
pub fn binary_boundaries(split_count: u64) -> Result<SplitBoundaries> {
    let split_size = BINARY_KEYSPACE / split_count;
    if split_size == 0 {
        return Err(Error::range_too_small(
            "0x00000000",
            "0xffffffff",
            split_count,
        ));
    }
    let mut values = boundary_buffer(split_count)?;
    values.extend((1..split_count).map(|i| {
        // i < split_count keeps the product below 2^32.
        let prefix = (split_size * i) as u32;
        BindValue::Bytes(prefix.to_be_bytes().to_vec())
    }));
    Ok(SplitBoundaries {
        values,
        row_count: split_size,
    })
}

/// Room for the `split_count - 1` interior boundaries.
fn boundary_buffer(split_count: u64) -> Result<Vec<BindValue>> {
    if split_count > MAX_SPLIT_COUNT {
        return Err(Error::InvalidArgumentError(format!(
            "split count {split_count} exceeds the maximum of {MAX_SPLIT_COUNT}"
        )));
    }
    let mut values = Vec::new();
    values
        .try_reserve_exact(split_count.saturating_sub(1) as usize)
        .map_err(|err| {
            Error::InvalidArgumentError(format!(
                "cannot allocate {split_count} split boundaries: {err}"
            ))
        })?;
    Ok(values)
}
