use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    db::{schema::Catalog, types::Record},
    error::Result,
};

const CATALOG_FILE: &str = "catalog.json";

/// Flat-file JSON storage: one catalog file plus one file per table
///
/// Every load reads the whole file and every save rewrites it, so a partial
/// write can only ever damage the file being written. Files are pretty-
/// printed UTF-8 JSON and stay hand-editable.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Loads the catalog, or an empty one when the file does not exist
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.dir.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Catalog::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.write_json(&self.dir.join(CATALOG_FILE), catalog)
    }

    /// Loads a table's records, or an empty collection when the file is absent
    ///
    /// Also ensures the data directory exists, so a following save cannot
    /// fail on a missing parent.
    pub fn load_records(&self, table_name: &str) -> Result<Vec<Record>> {
        fs::create_dir_all(&self.dir)?;
        let path = self.records_path(table_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_records(&self, table_name: &str, records: &[Record]) -> Result<()> {
        self.write_json(&self.records_path(table_name), &records)
    }

    /// Removes a dropped table's record file; an absent file is fine
    pub fn remove_records(&self, table_name: &str) -> Result<()> {
        let path = self.records_path(table_name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn records_path(&self, table_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", table_name))
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}
