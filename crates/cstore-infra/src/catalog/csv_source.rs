//! CSV-backed [`CatalogSource`].
//!
//! Expects a header row containing at least `brand`, `name`, `price`,
//! `event`, and `category`. Column order is free and extra columns are
//! ignored. Prices may carry thousands separators, a trailing `원`, or a
//! `.0` suffix from spreadsheet exports.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use cstore_core::catalog::CatalogSource;
use cstore_types::error::CatalogError;
use cstore_types::product::Product;

const REQUIRED_COLUMNS: [&str; 5] = ["brand", "name", "price", "event", "category"];

#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for CsvCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(self.describe()));
            }
            Err(err) => {
                return Err(CatalogError::Io(format!("{}: {err}", self.describe())));
            }
        };

        let products = parse_catalog(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "parsed catalog csv"
        );
        Ok(products)
    }
}

/// Parse catalog CSV bytes into products, in file order.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        products.push(columns.product(&record, line)?);
    }
    Ok(products)
}

/// Positions of the required columns within a header row.
struct ColumnIndex([usize; 5]);

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, CatalogError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let mut positions = [0usize; 5];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = normalized
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| CatalogError::MissingColumn(column.to_string()))?;
        }
        Ok(Self(positions))
    }

    fn product(&self, record: &StringRecord, line: u64) -> Result<Product, CatalogError> {
        let field = |i: usize| record.get(self.0[i]).unwrap_or("").to_string();
        let raw_price = record.get(self.0[2]).unwrap_or("");
        let price = parse_price(raw_price).ok_or_else(|| CatalogError::Parse {
            line,
            message: format!("invalid price '{raw_price}'"),
        })?;

        Ok(Product {
            brand: field(0),
            name: field(1),
            price,
            event: field(3),
            category: field(4),
        })
    }
}

/// Parse a price cell such as `1500`, `1,500`, `1500원`, or `1500.0`.
pub fn parse_price(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(value);
    }

    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn csv_error(err: csv::Error) -> CatalogError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    CatalogError::Parse {
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
brand,name,price,event,category,img_url
CU,서울우유 바나나맛,\"1,800\",1+1,음료,http://x/1.png
GS25,새우깡,1500원,2+1,과자,
emart24,막걸리 750ml,2000.0,1+1,주류,
";

    #[test]
    fn test_parse_catalog_in_file_order() {
        let products = parse_catalog(SAMPLE.as_bytes()).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "서울우유 바나나맛");
        assert_eq!(products[0].price, 1800);
        assert_eq!(products[1].price, 1500);
        assert_eq!(products[2].brand, "emart24");
        assert_eq!(products[2].price, 2000);
        assert_eq!(products[2].category, "주류");
    }

    #[test]
    fn test_parse_catalog_column_order_is_free() {
        let csv = "category,event,price,name,brand\n음료,1+1,900,콜라,CU\n";
        let products = parse_catalog(csv.as_bytes()).unwrap();
        assert_eq!(products[0].brand, "CU");
        assert_eq!(products[0].name, "콜라");
        assert_eq!(products[0].price, 900);
    }

    #[test]
    fn test_parse_catalog_tolerates_bom_header() {
        let csv = "\u{feff}brand,name,price,event,category\nCU,콜라,900,1+1,음료\n";
        let products = parse_catalog(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_parse_catalog_missing_column() {
        let csv = "brand,name,event,category\nCU,콜라,1+1,음료\n";
        let err = parse_catalog(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(ref c) if c == "price"));
    }

    #[test]
    fn test_parse_catalog_bad_price_reports_line() {
        let csv = "brand,name,price,event,category\nCU,콜라,900,1+1,음료\nCU,사이다,무료,1+1,음료\n";
        let err = parse_catalog(csv.as_bytes()).unwrap_err();
        match err {
            CatalogError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("무료"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("1500"), Some(1500));
        assert_eq!(parse_price(" 1,500 "), Some(1500));
        assert_eq!(parse_price("12,000원"), Some(12000));
        assert_eq!(parse_price("2000.0"), Some(2000));
        assert_eq!(parse_price("2000.5"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = CsvCatalogSource::new(tmp.path().join("absent.csv"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("categorized_data.csv");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let products = CsvCatalogSource::new(&path).load().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[1].name, "새우깡");
    }
}
