use crate::{
    db::{
        cache::QueryCache,
        clause::{Clause, render_clause},
        schema::{ID_COLUMN, Table},
        types::{Record, Value, parse_boolean_word},
    },
    error::{Error, Result},
};

/// Appends a new record built from positional raw values; returns its ID
///
/// Values align with the schema's columns after `ID`, which is assigned
/// automatically as max(existing)+1, or 1 for an empty table. Assignment is
/// not atomic across writers; the store assumes a single writer. The caller
/// persists the collection.
pub fn insert(table: &Table, records: &mut Vec<Record>, raw_values: &[String]) -> Result<i64> {
    let columns = table.value_columns();
    if raw_values.len() != columns.len() {
        return Err(Error::ArityMismatch {
            expected: columns.len(),
            got: raw_values.len(),
        });
    }

    let id = next_id(records);
    let mut record = Record::new();
    record.insert(ID_COLUMN.to_string(), Value::Integer(id));
    for (column, raw) in columns.iter().zip(raw_values) {
        record.insert(column.name.clone(), Value::coerce(column.datatype, raw)?);
    }
    records.push(record);
    Ok(id)
}

fn next_id(records: &[Record]) -> i64 {
    records
        .iter()
        .filter_map(|r| match r.get(ID_COLUMN) {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        })
        .max()
        .map_or(1, |max| max + 1)
}

/// Returns the records matching the filter, in original order
///
/// An empty filter matches everything. Results are memoized in the cache,
/// keyed by the collection's content fingerprint and the clause text.
pub fn select(records: &[Record], filter: &Clause, cache: &mut QueryCache) -> Result<Vec<Record>> {
    let key = (QueryCache::fingerprint(records), render_clause(filter));
    cache.get_or_compute(key, || {
        Ok(records.iter().filter(|r| matches(r, filter)).cloned().collect())
    })
}

/// Applies the set clause to every record matching the filter
///
/// Returns the rebuilt sequence (same length and order as the input) and
/// the number of records the filter matched, counted by the match predicate
/// itself. New values are coerced by the runtime kind of the field they
/// replace; set-clause columns the record does not have are skipped.
///
/// An empty filter matches every record: with no entries to check, the
/// conjunction is vacuously true, so `update` without a WHERE clause
/// updates the whole table.
pub fn update(
    records: &[Record],
    set_clause: &Clause,
    filter: &Clause,
) -> Result<(Vec<Record>, usize)> {
    let mut updated = Vec::with_capacity(records.len());
    let mut matched = 0;

    for record in records {
        if !matches(record, filter) {
            updated.push(record.clone());
            continue;
        }
        matched += 1;
        let mut record = record.clone();
        for (column, raw) in set_clause {
            if let Some(current) = record.get(column) {
                record.insert(column.clone(), Value::coerce_like(current, raw)?);
            }
        }
        updated.push(record);
    }

    Ok((updated, matched))
}

/// Returns the records that survive the filter
///
/// An empty filter deletes everything, asymmetric with `select` where it
/// means "no filter". The interactive layer gates this behind confirmation.
pub fn delete(records: &[Record], filter: &Clause) -> Vec<Record> {
    if filter.is_empty() {
        return Vec::new();
    }
    records.iter().filter(|r| !matches(r, filter)).cloned().collect()
}

/// True when every clause entry matches the record (logical AND)
///
/// Boolean fields compare by boolean equality when the filter value reads
/// as a boolean word; everything else compares textual representations.
/// A column the record does not have never matches.
fn matches(record: &Record, filter: &Clause) -> bool {
    filter.iter().all(|(column, raw)| match record.get(column) {
        Some(Value::Boolean(stored)) => match parse_boolean_word(raw) {
            Some(wanted) => *stored == wanted,
            None => stored.to_string() == *raw,
        },
        Some(value) => value.to_string() == *raw,
        None => false,
    })
}
