use serde::{Deserialize, Serialize};

use crate::{
    db::types::DataType,
    error::{Error, Result},
};

/// Auto-assigned primary key column present in every table
pub const ID_COLUMN: &str = "ID";

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    /// Parses a `name:type` column spec
    fn from_spec(spec: &str) -> Result<Self> {
        let (name, tag) = spec
            .split_once(':')
            .ok_or_else(|| Error::InvalidColumnFormat(spec.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            datatype: DataType::from_tag(tag)?,
        })
    }
}

/// Table schema definition
///
/// Immutable once created: the first column is always the auto `ID` key,
/// followed by the user's columns in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// The columns a caller supplies values for on insert (everything but ID)
    pub fn value_columns(&self) -> &[Column] {
        &self.columns[1..]
    }
}

/// The database catalog: every table schema, in creation order
///
/// Mutated only by create/drop; the session persists it wholesale after
/// each mutation.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from `name:type` column specs, prepending `ID:int`
    pub fn create_table(&mut self, name: &str, column_specs: &[String]) -> Result<()> {
        if self.get(name).is_some() {
            return Err(Error::DuplicateTable(name.to_string()));
        }

        let mut columns = vec![Column {
            name: ID_COLUMN.to_string(),
            datatype: DataType::Integer,
        }];
        for spec in column_specs {
            columns.push(Column::from_spec(spec)?);
        }

        self.tables.push(Table {
            name: name.to_string(),
            columns,
        });
        Ok(())
    }

    /// Removes a table schema; the caller deletes the persisted record file
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        let pos = self
            .tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))?;
        self.tables.remove(pos);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns table info, returns error if table doesn't exist
    pub fn must_get(&self, name: &str) -> Result<&Table> {
        self.get(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_table_prepends_id() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.create_table("users", &specs(&["name:str", "age:int", "active:bool"]))?;

        let table = catalog.must_get("users")?;
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ID", "name", "age", "active"]);
        assert_eq!(table.columns[0].datatype, DataType::Integer);
        assert_eq!(table.columns[1].datatype, DataType::Text);
        assert_eq!(table.columns[2].datatype, DataType::Integer);
        assert_eq!(table.columns[3].datatype, DataType::Boolean);
        Ok(())
    }

    #[test]
    fn test_create_table_duplicate_leaves_catalog_unchanged() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.create_table("users", &specs(&["name:str"]))?;

        let before = serde_json::to_string(&catalog)?;
        assert_eq!(
            catalog.create_table("users", &specs(&["other:int"])),
            Err(Error::DuplicateTable("users".to_string()))
        );
        assert_eq!(serde_json::to_string(&catalog)?, before);
        Ok(())
    }

    #[test]
    fn test_create_table_rejects_bad_specs() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.create_table("t", &specs(&["noseparator"])),
            Err(Error::InvalidColumnFormat("noseparator".to_string()))
        );
        assert_eq!(
            catalog.create_table("t", &specs(&["age:float"])),
            Err(Error::InvalidColumnType("float".to_string()))
        );
        // Type tags are case-insensitive
        assert!(catalog.create_table("t", &specs(&["age:INT", "ok:Bool"])).is_ok());
    }

    #[test]
    fn test_drop_table() -> Result<()> {
        let mut catalog = Catalog::new();
        catalog.create_table("users", &specs(&["name:str"]))?;
        catalog.create_table("orders", &specs(&["total:int"]))?;

        catalog.drop_table("users")?;
        assert_eq!(catalog.table_names(), vec!["orders"]);
        assert_eq!(
            catalog.drop_table("users"),
            Err(Error::UnknownTable("users".to_string()))
        );
        Ok(())
    }
}
