// src/store/mod.rs

//! Database access shared by the HTTP handlers and the importer CLI.

pub mod import;
pub mod questions;
pub mod results;
pub mod test_banks;
