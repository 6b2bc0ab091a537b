//! Spreadsheet adapters: reading the source workbooks and writing the derived
//! artifacts.

pub mod excel_read;
pub mod excel_write;
