pub mod columns;
pub mod csv_export;
pub mod csv_import;
pub mod file;
pub mod sheet;
