use std::collections::BTreeMap;

use crate::{
    db::types::unquote,
    error::{Error, Result},
};

/// A parsed single-condition clause: column name to raw comparison value
///
/// Values stay textual as received; coercion happens during matching or
/// assignment. An empty clause means "no filter".
pub type Clause = BTreeMap<String, String>;

/// Parses a `column = value` clause into a single-entry mapping
///
/// Splits on the first `=` only, so the value may itself contain `=`.
/// One matching pair of surrounding quotes is stripped from the value.
/// An empty input yields an empty mapping.
pub fn parse_clause(text: &str) -> Result<Clause> {
    let mut clause = Clause::new();
    if text.is_empty() {
        return Ok(clause);
    }

    let (column, value) = text
        .split_once('=')
        .ok_or_else(|| Error::MalformedClause(text.to_string()))?;
    clause.insert(
        column.trim().to_string(),
        unquote(value.trim()).to_string(),
    );
    Ok(clause)
}

/// Renders a clause back to canonical text (used as part of the cache key)
pub fn render_clause(clause: &Clause) -> String {
    clause
        .iter()
        .map(|(column, value)| format!("{}={}", column, value))
        .collect::<Vec<_>>()
        .join(",")
}
