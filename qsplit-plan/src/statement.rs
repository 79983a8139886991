use sqlparser::ast::{Select, SetExpr, Statement};

/// The single SELECT body of a validated statement.
pub(crate) fn select_body(statement: &Statement) -> Option<&Select> {
    match statement {
        Statement::Query(query) => match query.body.as_ref() {
            SetExpr::Select(select) => Some(select.as_ref()),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn select_body_mut(statement: &mut Statement) -> Option<&mut Select> {
    match statement {
        Statement::Query(query) => match query.body.as_mut() {
            SetExpr::Select(select) => Some(select.as_mut()),
            _ => None,
        },
        _ => None,
    }
}
