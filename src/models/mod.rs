// src/models/mod.rs

pub mod exam_result;
pub mod import;
pub mod question;
pub mod test_bank;
