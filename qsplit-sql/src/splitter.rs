use std::iter;

use qsplit_catalog::SchemaLookup;
use qsplit_plan::{
    BindVarNames, ResolvedTarget, SplitBoundaries, build_range_predicate, compute_boundaries,
    validate,
};
use qsplit_types::{BindValue, BindVariables, MinMaxResult, TypeFamily};

use crate::SplitResult;
use crate::options::SplitOptions;
use crate::request::{QuerySplit, SplitRequest};

/// A validated split session over one statement.
///
/// Construction parses and validates the statement; the splitting methods
/// only read it, so one session can produce splits repeatedly (for example
/// with boundaries from a refreshed min/max) and always yields the same
/// output for the same input.
#[derive(Debug, Clone)]
pub struct QuerySplitter {
    request: SplitRequest,
    target: ResolvedTarget,
    options: SplitOptions,
}

impl QuerySplitter {
    /// Validate `request` against `schema` with default options.
    pub fn new<S>(request: SplitRequest, schema: &S) -> SplitResult<Self>
    where
        S: SchemaLookup + ?Sized,
    {
        Self::with_options(request, schema, SplitOptions::default())
    }

    pub fn with_options<S>(
        request: SplitRequest,
        schema: &S,
        options: SplitOptions,
    ) -> SplitResult<Self>
    where
        S: SchemaLookup + ?Sized,
    {
        options.bind_names.validate(&request.bind_variables)?;
        let target = validate(
            &request.sql,
            schema,
            request.split_column.as_deref(),
            options.dialect,
        )?;
        Ok(Self {
            request,
            target,
            options,
        })
    }

    pub fn request(&self) -> &SplitRequest {
        &self.request
    }

    pub fn resolved(&self) -> &ResolvedTarget {
        &self.target
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    pub fn split_count(&self) -> u64 {
        self.request.split_count
    }

    /// The aggregate statement whose result [`QuerySplitter::split`] expects.
    pub fn min_max_query(&self) -> SplitResult<String> {
        self.target.min_max_query()
    }

    /// Compute boundaries for the split column without rendering splits.
    pub fn boundaries<T>(
        &self,
        column_type: T,
        min_max: Option<&MinMaxResult>,
    ) -> SplitResult<SplitBoundaries>
    where
        T: Into<TypeFamily>,
    {
        compute_boundaries(column_type.into(), min_max, self.split_count())
    }

    /// Split the statement using the split column's declared type and the
    /// caller's min/max aggregate result.
    pub fn split<T>(
        &self,
        column_type: T,
        min_max: Option<&MinMaxResult>,
    ) -> SplitResult<Vec<QuerySplit>>
    where
        T: Into<TypeFamily>,
    {
        let boundaries = self.boundaries(column_type, min_max)?;
        self.split_with_boundaries(&boundaries)
    }

    /// Render splits for precomputed, strictly increasing boundaries.
    pub fn split_with_boundaries(
        &self,
        boundaries: &SplitBoundaries,
    ) -> SplitResult<Vec<QuerySplit>> {
        assemble_splits(
            &self.target,
            &self.request.sql,
            &self.request.bind_variables,
            boundaries,
            &self.options.bind_names,
        )
    }
}

/// Turn boundaries into ordered splits.
///
/// With no boundaries the original text and variables come back as the only
/// split. Otherwise split `i` covers `[boundary[i-1], boundary[i])`, the first
/// split being unbounded below and the last unbounded above.
pub fn assemble_splits(
    target: &ResolvedTarget,
    original_sql: &str,
    bind_variables: &BindVariables,
    boundaries: &SplitBoundaries,
    names: &BindVarNames,
) -> SplitResult<Vec<QuerySplit>> {
    if boundaries.is_empty() {
        tracing::debug!(table = target.table_name(), "no boundaries, returning original query");
        return Ok(vec![QuerySplit {
            sql: original_sql.to_string(),
            bind_variables: bind_variables.clone(),
            row_count: 0,
        }]);
    }

    let original_where = target.selection();
    let ends = boundaries.values.iter().map(Some).chain(iter::once(None));
    let mut splits = Vec::with_capacity(boundaries.len() + 1);
    let mut start: Option<&BindValue> = None;
    for end in ends {
        let mut split_vars = bind_variables.clone();
        let selection = build_range_predicate(
            original_where,
            target.split_column(),
            start,
            end,
            names,
            &mut split_vars,
        );
        let sql = target.render_with_selection(selection)?;
        tracing::trace!(
            index = splits.len(),
            start = ?start,
            end = ?end,
            %sql,
            "rendered split"
        );
        splits.push(QuerySplit {
            sql,
            bind_variables: split_vars,
            row_count: boundaries.row_count,
        });
        start = end;
    }

    tracing::debug!(
        table = target.table_name(),
        split_column = %target.split_column(),
        splits = splits.len(),
        row_count = boundaries.row_count,
        "assembled query splits"
    );
    Ok(splits)
}
