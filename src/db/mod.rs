//! Query execution module
//!
//! This module provides:
//! - `types`: column data types, runtime values, and input coercion
//! - `schema`: table/column schemas and the catalog (create/drop)
//! - `clause`: the single-condition WHERE/SET clause parser
//! - `engine`: insert/select/update/delete over a table's records
//! - `cache`: the memoizing cache for read queries

use std::path::Path;

use crate::{
    db::{
        cache::QueryCache,
        clause::Clause,
        schema::{Catalog, Table},
        types::Record,
    },
    error::Result,
    storage::json::JsonStorage,
};

pub mod cache;
pub mod clause;
pub mod engine;
pub mod schema;
pub mod types;

/// A database session: storage handle, catalog, and read-query cache
///
/// One session per opened database. Records are loaded fresh from storage
/// before every operation and written back wholesale after every mutation;
/// the query cache is cleared whenever anything mutates. The session does
/// no printing or prompting; interactive side effects belong to the caller.
pub struct Database {
    storage: JsonStorage,
    catalog: Catalog,
    cache: QueryCache,
}

impl Database {
    /// Opens the database rooted at the given data directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let storage = JsonStorage::new(dir);
        let catalog = storage.load_catalog()?;
        Ok(Self {
            storage,
            catalog,
            cache: QueryCache::new(),
        })
    }

    /// Creates a table from `name:type` column specs and persists the catalog
    pub fn create_table(&mut self, name: &str, column_specs: &[String]) -> Result<()> {
        self.catalog.create_table(name, column_specs)?;
        self.storage.save_catalog(&self.catalog)
    }

    /// Drops a table and removes its record file
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        self.catalog.drop_table(name)?;
        self.storage.save_catalog(&self.catalog)?;
        self.storage.remove_records(name)?;
        self.cache.invalidate();
        Ok(())
    }

    pub fn list_tables(&self) -> Vec<&str> {
        self.catalog.table_names()
    }

    pub fn table_info(&self, name: &str) -> Result<&Table> {
        self.catalog.must_get(name)
    }

    /// Inserts one record from positional raw values; returns the new ID
    pub fn insert(&mut self, table_name: &str, raw_values: &[String]) -> Result<i64> {
        let table = self.catalog.must_get(table_name)?;
        let mut records = self.storage.load_records(table_name)?;
        let id = engine::insert(table, &mut records, raw_values)?;
        self.storage.save_records(table_name, &records)?;
        self.cache.invalidate();
        Ok(id)
    }

    /// Returns the records matching the filter, through the query cache
    pub fn select(&mut self, table_name: &str, filter: &Clause) -> Result<Vec<Record>> {
        self.catalog.must_get(table_name)?;
        let records = self.storage.load_records(table_name)?;
        engine::select(&records, filter, &mut self.cache)
    }

    /// Updates matching records; returns how many the filter matched
    pub fn update(&mut self, table_name: &str, set_clause: &Clause, filter: &Clause) -> Result<usize> {
        self.catalog.must_get(table_name)?;
        let records = self.storage.load_records(table_name)?;
        let (updated, matched) = engine::update(&records, set_clause, filter)?;
        self.storage.save_records(table_name, &updated)?;
        self.cache.invalidate();
        Ok(matched)
    }

    /// Deletes matching records; returns how many were removed
    pub fn delete(&mut self, table_name: &str, filter: &Clause) -> Result<usize> {
        self.catalog.must_get(table_name)?;
        let records = self.storage.load_records(table_name)?;
        let kept = engine::delete(&records, filter);
        let removed = records.len() - kept.len();
        self.storage.save_records(table_name, &kept)?;
        self.cache.invalidate();
        Ok(removed)
    }
}
