use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
};

use crate::{db::types::Record, error::Result};

/// Memoization cache for read queries
///
/// Keys pair a content fingerprint of the records collection with the
/// textual form of the filter clause, so structurally identical collections
/// share entries and an in-place mutation can never alias a stale result.
/// The owning session clears the cache after every mutating operation; its
/// lifetime is at most one database session.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<(u64, String), Vec<Record>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content fingerprint of a records collection
    pub fn fingerprint(records: &[Record]) -> u64 {
        let mut hasher = DefaultHasher::new();
        records.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the cached result for `key`, computing and storing it on a miss
    pub fn get_or_compute<F>(&mut self, key: (u64, String), compute_fn: F) -> Result<Vec<Record>>
    where
        F: FnOnce() -> Result<Vec<Record>>,
    {
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }
        let result = compute_fn()?;
        self.entries.insert(key, result.clone());
        Ok(result)
    }

    /// Drops every entry; called after any mutating operation
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::types::Value, error::Result};

    fn record(id: i64) -> Record {
        let mut r = Record::new();
        r.insert("ID".to_string(), Value::Integer(id));
        r
    }

    #[test]
    fn test_second_lookup_skips_compute() -> Result<()> {
        let mut cache = QueryCache::new();
        let records = vec![record(1), record(2)];
        let key = (QueryCache::fingerprint(&records), "".to_string());

        let mut calls = 0;
        for _ in 0..2 {
            let result = cache.get_or_compute(key.clone(), || {
                calls += 1;
                Ok(records.clone())
            })?;
            assert_eq!(result, records);
        }
        assert_eq!(calls, 1);
        Ok(())
    }

    #[test]
    fn test_identical_content_shares_a_fingerprint() {
        let a = vec![record(1)];
        let b = vec![record(1)];
        assert_eq!(QueryCache::fingerprint(&a), QueryCache::fingerprint(&b));
        assert_ne!(
            QueryCache::fingerprint(&a),
            QueryCache::fingerprint(&[record(2)])
        );
    }

    #[test]
    fn test_failed_compute_stores_nothing() {
        let mut cache = QueryCache::new();
        let key = (0, "age=28".to_string());
        let result = cache.get_or_compute(key, || {
            Err(crate::error::Error::InvalidValue("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_invalidate_clears_entries() -> Result<()> {
        let mut cache = QueryCache::new();
        cache.get_or_compute((1, "".to_string()), || Ok(vec![record(1)]))?;
        cache.get_or_compute((2, "".to_string()), || Ok(vec![record(2)]))?;
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert_eq!(cache.len(), 0);
        Ok(())
    }
}
