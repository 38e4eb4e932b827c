//! flatbase - a minimal flat-file tabular data store
//!
//! This crate provides:
//! - Typed table schemas tracked in a single JSON catalog
//! - Insert/select/update/delete over per-table JSON record files
//! - A single-condition WHERE/SET clause parser
//! - A memoizing cache for read queries
//! - A line-oriented interactive command interpreter

pub mod db;
pub mod error;
pub mod repl;
pub mod storage;
