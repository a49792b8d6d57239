pub mod column_mapping;
pub mod row_normalizer;
pub mod sheet_import;
