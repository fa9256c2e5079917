// src/handlers/mod.rs

pub mod import;
pub mod questions;
pub mod results;
pub mod test_banks;
