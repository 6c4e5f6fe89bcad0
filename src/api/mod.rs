use async_trait::async_trait;
use crate::models::{DailyTrendPoint, Product, RevenueSummary};

pub mod client;
pub mod error;
pub mod products;
pub mod sales;
pub mod forecasts;
pub mod logs;

pub use client::ApiClient;
pub use error::ApiError;

/// Default window for the dashboard's sales chart.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;
/// Default forecast horizon when the caller does not pick one.
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

// Local date-time bounds for the range endpoints, e.g. `2024-05-01T00:00:00`.
const PERIOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn period_query(start: chrono::NaiveDateTime, end: chrono::NaiveDateTime) -> [(&'static str, String); 2] {
    [
        ("startDate", start.format(PERIOD_FORMAT).to_string()),
        ("endDate", end.format(PERIOD_FORMAT).to_string()),
    ]
}

/// The slice of the backend the dashboard depends on.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn products(&self) -> Result<Vec<Product>, ApiError>;
    async fn total_revenue(&self) -> Result<RevenueSummary, ApiError>;
    async fn sales_history(&self, days: u32) -> Result<Vec<DailyTrendPoint>, ApiError>;
}

#[async_trait]
impl InventoryBackend for ApiClient {
    fn name(&self) -> &str {
        self.api_root()
    }

    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch_products().await
    }

    async fn total_revenue(&self) -> Result<RevenueSummary, ApiError> {
        self.fetch_total_revenue().await
    }

    async fn sales_history(&self, days: u32) -> Result<Vec<DailyTrendPoint>, ApiError> {
        self.fetch_sales_history(days).await
    }
}
