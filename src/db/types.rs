use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
    Boolean,
}

impl DataType {
    /// Parses the type tag of a `name:type` column spec (case-insensitive)
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.to_lowercase().as_str() {
            "int" => Ok(Self::Integer),
            "str" => Ok(Self::Text),
            "bool" => Ok(Self::Boolean),
            _ => Err(Error::InvalidColumnType(tag.to_string())),
        }
    }

    /// The tag this type is written as in column specs and `info` output
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Text => "str",
            Self::Boolean => "bool",
        }
    }
}

/// Runtime value stored in a record field
///
/// Untagged so records serialize as plain JSON scalars: `28`, `true`, `"Ann"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Coerces raw textual input per the declared column type (insert path)
    pub fn coerce(datatype: DataType, raw: &str) -> Result<Self> {
        match datatype {
            DataType::Integer => parse_integer(raw),
            DataType::Boolean => parse_boolean(raw),
            DataType::Text => Ok(Self::Text(unquote(raw).to_string())),
        }
    }

    /// Coerces raw input by the runtime kind of the value being replaced
    /// (update path)
    ///
    /// The schema is not consulted: a boolean field applies the boolean
    /// rule, an integer field the integer rule, anything else is taken
    /// verbatim (the clause parser already stripped the quote layer).
    pub fn coerce_like(current: &Value, raw: &str) -> Result<Self> {
        match current {
            Value::Boolean(_) => parse_boolean(raw),
            Value::Integer(_) => parse_integer(raw),
            Value::Text(_) => Ok(Self::Text(raw.to_string())),
        }
    }

    /// Returns the data type of the value
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Boolean(_) => DataType::Boolean,
            Self::Text(_) => DataType::Text,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// One row: a mapping of column name to stored value
///
/// Always holds exactly the columns of its table's schema, including `ID`.
pub type Record = BTreeMap<String, Value>;

fn parse_integer(raw: &str) -> Result<Value> {
    raw.parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| Error::InvalidValue(format!("{} is not an integer", raw)))
}

fn parse_boolean(raw: &str) -> Result<Value> {
    parse_boolean_word(raw)
        .map(Value::Boolean)
        .ok_or_else(|| Error::InvalidValue(format!("{} is not a boolean", raw)))
}

/// Reads a boolean word without failing; `None` when it isn't one
///
/// Accepted spellings (case-insensitive): true/1/yes and false/0/no.
pub fn parse_boolean_word(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Strips one layer of matching surrounding quotes (`"` or `'`), if present
pub fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn test_coerce_integer() -> Result<()> {
        assert_eq!(Value::coerce(DataType::Integer, "28")?, Value::Integer(28));
        assert_eq!(Value::coerce(DataType::Integer, "-5")?, Value::Integer(-5));
        assert!(Value::coerce(DataType::Integer, "28.5").is_err());
        assert!(Value::coerce(DataType::Integer, "abc").is_err());
        assert!(Value::coerce(DataType::Integer, "").is_err());
        Ok(())
    }

    #[test]
    fn test_coerce_boolean() -> Result<()> {
        for word in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(Value::coerce(DataType::Boolean, word)?, Value::Boolean(true));
        }
        for word in ["false", "FALSE", "0", "no", "No"] {
            assert_eq!(Value::coerce(DataType::Boolean, word)?, Value::Boolean(false));
        }
        assert!(Value::coerce(DataType::Boolean, "maybe").is_err());
        Ok(())
    }

    #[test]
    fn test_coerce_text_strips_one_quote_layer() -> Result<()> {
        assert_eq!(
            Value::coerce(DataType::Text, "\"Ann\"")?,
            Value::Text("Ann".to_string())
        );
        assert_eq!(
            Value::coerce(DataType::Text, "'Ann'")?,
            Value::Text("Ann".to_string())
        );
        // Only one layer comes off, and only a matching pair
        assert_eq!(
            Value::coerce(DataType::Text, "\"'Ann'\"")?,
            Value::Text("'Ann'".to_string())
        );
        assert_eq!(
            Value::coerce(DataType::Text, "\"Ann'")?,
            Value::Text("\"Ann'".to_string())
        );
        assert_eq!(Value::coerce(DataType::Text, "Ann")?, Value::Text("Ann".to_string()));
        Ok(())
    }

    #[test]
    fn test_coerce_like_follows_runtime_kind() -> Result<()> {
        assert_eq!(
            Value::coerce_like(&Value::Integer(28), "29")?,
            Value::Integer(29)
        );
        assert_eq!(
            Value::coerce_like(&Value::Boolean(false), "yes")?,
            Value::Boolean(true)
        );
        // Text is verbatim: the set-clause parser already unquoted it
        assert_eq!(
            Value::coerce_like(&Value::Text("a".to_string()), "b")?,
            Value::Text("b".to_string())
        );
        assert!(Value::coerce_like(&Value::Integer(1), "old").is_err());
        assert!(Value::coerce_like(&Value::Boolean(true), "2").is_err());
        Ok(())
    }

    #[test]
    fn test_value_json_round_trip() -> Result<()> {
        let mut record = Record::new();
        record.insert("ID".to_string(), Value::Integer(1));
        record.insert("name".to_string(), Value::Text("Ann".to_string()));
        record.insert("active".to_string(), Value::Boolean(true));

        let json = serde_json::to_string(&record)?;
        assert_eq!(json, r#"{"ID":1,"active":true,"name":"Ann"}"#);
        let back: Record = serde_json::from_str(&json)?;
        assert_eq!(back, record);
        Ok(())
    }
}
