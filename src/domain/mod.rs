pub mod error;

// Spreadsheet import module
pub mod import;
