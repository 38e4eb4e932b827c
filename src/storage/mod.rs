//! Flat-file persistence module
//!
//! This module provides:
//! - `json`: whole-file JSON storage for the catalog and per-table records

pub mod json;
