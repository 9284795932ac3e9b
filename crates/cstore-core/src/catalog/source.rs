use std::future::Future;

use cstore_types::error::CatalogError;
use cstore_types::product::Product;

/// Port for loading the full product catalog from storage.
///
/// Uses native async fn in traits (RPITIT). The CSV-backed implementation
/// lives in cstore-infra.
pub trait CatalogSource: Send + Sync + 'static {
    /// Where the catalog is read from, for logs and error messages.
    fn describe(&self) -> String;

    /// Read every listing, in file order.
    fn load(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}
