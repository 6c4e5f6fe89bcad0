pub mod chart;
pub mod fallback;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, InventoryBackend, DEFAULT_HISTORY_DAYS};
use crate::models::{Product, RevenueSummary};
use chart::{chart_points, ChartPoint};
use fallback::SalesHistoryFallback;

/// Where the sales chart data came from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSource {
    Backend,
    /// Placeholder data; `reason` says why the real series was not used.
    Fallback { strategy: String, reason: String },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Dashboard {
    pub products: Vec<Product>,
    pub low_stock: Vec<Product>,
    pub total_stock: i64,
    pub revenue: RevenueSummary,
    pub chart: Vec<ChartPoint>,
    pub chart_source: ChartSource,
}

pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_low_stock()).cloned().collect()
}

pub fn total_stock(products: &[Product]) -> i64 {
    products.iter().filter_map(|p| p.quantity_on_hand.get()).sum()
}

/// Load everything the dashboard shows, with the three requests in flight at once.
///
/// Product and revenue failures fail the load. A missing or empty sales
/// history is handed to `fallback`; if it declines, the error is returned.
pub async fn load_dashboard(
    backend: &dyn InventoryBackend,
    fallback: &dyn SalesHistoryFallback,
    today: NaiveDate,
) -> Result<Dashboard, ApiError> {
    let (products, revenue, history) = tokio::join!(
        backend.products(),
        backend.total_revenue(),
        backend.sales_history(DEFAULT_HISTORY_DAYS),
    );

    let products = products?;
    let revenue = revenue?;

    let (chart, chart_source) = match history {
        Ok(points) if !points.is_empty() => (chart_points(&points), ChartSource::Backend),
        Ok(_) => substitute(fallback, today, "backend returned no sales history".to_string())
            .unwrap_or((Vec::new(), ChartSource::Backend)),
        Err(e) => {
            tracing::info!(backend = backend.name(), error = %e, "sales history unavailable");
            match substitute(fallback, today, e.to_string()) {
                Some(found) => found,
                None => return Err(e),
            }
        }
    };

    Ok(Dashboard {
        low_stock: low_stock(&products),
        total_stock: total_stock(&products),
        products,
        revenue,
        chart,
        chart_source,
    })
}

fn substitute(
    fallback: &dyn SalesHistoryFallback,
    today: NaiveDate,
    reason: String,
) -> Option<(Vec<ChartPoint>, ChartSource)> {
    let series = fallback.substitute(DEFAULT_HISTORY_DAYS, today)?;
    tracing::info!(strategy = fallback.name(), %reason, "using fallback sales history");
    Some((
        series,
        ChartSource::Fallback { strategy: fallback.name().to_string(), reason },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyTrendPoint, Extra, Nullable};
    use async_trait::async_trait;
    use fallback::{MockSeries, NoFallback};
    use reqwest::StatusCode;

    struct StubBackend {
        products: Vec<Product>,
        history: Result<Vec<DailyTrendPoint>, u16>,
    }

    #[async_trait]
    impl InventoryBackend for StubBackend {
        fn name(&self) -> &str {
            "stub"
        }

        async fn products(&self) -> Result<Vec<Product>, ApiError> {
            Ok(self.products.clone())
        }

        async fn total_revenue(&self) -> Result<RevenueSummary, ApiError> {
            Ok(serde_json::from_str(r#"{"totalRevenue":99.5,"totalSales":4,"totalQuantitySold":9}"#).unwrap())
        }

        async fn sales_history(&self, days: u32) -> Result<Vec<DailyTrendPoint>, ApiError> {
            assert_eq!(days, DEFAULT_HISTORY_DAYS);
            match &self.history {
                Ok(points) => Ok(points.clone()),
                Err(code) => Err(ApiError::status(StatusCode::from_u16(*code).unwrap(), None)),
            }
        }
    }

    fn product(id: i64, qty: i64, threshold: i64) -> Product {
        Product {
            id,
            name: Nullable::Value(format!("Item {}", id)),
            sku: Nullable::Value(format!("SKU-{}", id)),
            quantity_on_hand: Nullable::Value(qty),
            low_stock_threshold: Nullable::Value(threshold),
            price: Nullable::Null,
            cost_price: Nullable::Null,
            discontinued: Nullable::Absent,
            extra: Extra::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_low_stock_and_total() {
        let mut unknown = product(4, 1, 10);
        unknown.low_stock_threshold = Nullable::Absent;
        let products = vec![product(1, 3, 10), product(2, 10, 10), product(3, 50, 10), unknown];
        let low: Vec<i64> = low_stock(&products).iter().map(|p| p.id).collect();
        assert_eq!(low, vec![1, 2]);
        assert_eq!(total_stock(&products), 64);
    }

    #[tokio::test]
    async fn test_backend_history_used_when_present() {
        let backend = StubBackend {
            products: vec![product(1, 3, 10)],
            history: Ok(vec![DailyTrendPoint::new("2024-06-29", 4)]),
        };
        let dashboard = load_dashboard(&backend, &MockSeries::default(), today()).await.unwrap();
        assert_eq!(dashboard.chart_source, ChartSource::Backend);
        assert_eq!(dashboard.chart, vec![ChartPoint { label: "Jun 29".to_string(), sales: 4.0 }]);
        assert_eq!(dashboard.low_stock.len(), 1);
        assert_eq!(dashboard.revenue.total_sales.as_ref().and_then(|n| n.as_i64()), Some(4));
    }

    #[tokio::test]
    async fn test_failed_history_uses_labeled_fallback() {
        let backend = StubBackend { products: vec![], history: Err(404) };
        let dashboard = load_dashboard(&backend, &MockSeries::default(), today()).await.unwrap();

        assert_eq!(dashboard.chart.len(), DEFAULT_HISTORY_DAYS as usize);
        match dashboard.chart_source {
            ChartSource::Fallback { strategy, reason } => {
                assert_eq!(strategy, "mock");
                assert!(reason.contains("404"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_history_without_fallback_surfaces_error() {
        let backend = StubBackend { products: vec![], history: Err(503) };
        let err = load_dashboard(&backend, &NoFallback, today()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_empty_history_without_fallback_is_empty_chart() {
        let backend = StubBackend { products: vec![], history: Ok(vec![]) };
        let dashboard = load_dashboard(&backend, &NoFallback, today()).await.unwrap();
        assert!(dashboard.chart.is_empty());
        assert_eq!(dashboard.chart_source, ChartSource::Backend);
    }
}
