use qsplit_result::{Error, Result};
use rustc_hash::FxHashSet;

/// Ensure that a name is not blank.
pub(crate) fn ensure_non_blank<F>(name: &str, make_error: F) -> Result<()>
where
    F: Fn() -> String,
{
    if name.trim().is_empty() {
        return Err(Error::InvalidArgumentError(make_error()));
    }
    Ok(())
}

/// Ensure that a slice is not empty.
pub(crate) fn ensure_non_empty<T, F>(items: &[T], make_error: F) -> Result<()>
where
    F: Fn() -> String,
{
    if items.is_empty() {
        return Err(Error::InvalidArgumentError(make_error()));
    }
    Ok(())
}

/// Ensure that all names are unique when compared case-insensitively.
pub(crate) fn ensure_unique_case_insensitive<'a, I, F>(names: I, make_error: F) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> String,
{
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for name in names {
        let normalized = name.to_ascii_lowercase();
        if !seen.insert(normalized) {
            return Err(Error::InvalidArgumentError(make_error(name)));
        }
    }
    Ok(())
}
