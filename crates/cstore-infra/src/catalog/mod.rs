//! Catalog storage adapters.

pub mod csv_source;

pub use csv_source::CsvCatalogSource;
