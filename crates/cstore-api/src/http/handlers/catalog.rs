//! Catalog HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/summary  - Headline statistics, or `available: false`
//! - GET /api/v1/products - Substring search over product names

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cstore_types::product::{BrandStat, Product};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

const DEFAULT_SEARCH_LIMIT: usize = 50;
const MAX_SEARCH_LIMIT: usize = 500;

/// Catalog statistics. Everything but `available` is omitted when the
/// catalog cannot be loaded.
#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands_count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<BrandStat>,
}

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<ApiResponse<SummaryBody>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let body = match state.catalog().get().await {
        Ok(catalog) => {
            let summary = catalog.summary();
            SummaryBody {
                available: true,
                total_count: Some(summary.total_count),
                brands_count: Some(summary.brands_count),
                brands: catalog.brand_stats(),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable for summary");
            SummaryBody {
                available: false,
                total_count: None,
                brands_count: None,
                brands: Vec::new(),
            }
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(body, request_id, elapsed).with_link("self", "/api/v1/summary"))
}

#[derive(Debug, Deserialize)]
pub struct ProductSearchQuery {
    #[serde(default)]
    pub q: String,
    pub brand: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProductSearchBody {
    /// Matches before `limit` was applied.
    pub total: usize,
    pub products: Vec<Product>,
}

/// GET /api/v1/products?q=&brand=&limit=
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductSearchQuery>,
) -> Result<Json<ApiResponse<ProductSearchBody>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if limit == 0 || limit > MAX_SEARCH_LIMIT {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_SEARCH_LIMIT}"
        )));
    }

    let catalog = state.catalog().get().await?;
    let brand = query
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());
    let matches = catalog.search(query.q.trim(), brand);

    let body = ProductSearchBody {
        total: matches.len(),
        products: matches.into_iter().take(limit).cloned().collect(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(body, request_id, elapsed).with_link("self", "/api/v1/products"),
    ))
}
