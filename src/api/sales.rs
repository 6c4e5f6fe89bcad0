use chrono::NaiveDateTime;
use reqwest::Method;
use super::{period_query, ApiClient, ApiError};
use crate::models::{DailyTrendPoint, NewSale, RevenueSummary, Sale};

impl ApiClient {
    /// Legacy form: `POST /sales/quick?productId=&quantitySold=` with no body.
    ///
    /// Kept alongside [`ApiClient::record_sale`]; the backend still serves both.
    pub async fn record_quick_sale(&self, product_id: i64, quantity_sold: i64) -> Result<Sale, ApiError> {
        let query = [
            ("productId", product_id.to_string()),
            ("quantitySold", quantity_sold.to_string()),
        ];
        self.send_empty(Method::POST, &["sales", "quick"], &query).await
    }

    pub async fn record_sale(&self, sale: &NewSale) -> Result<Sale, ApiError> {
        self.send_json(Method::POST, &["sales"], sale).await
    }

    pub async fn fetch_all_sales(&self) -> Result<Vec<Sale>, ApiError> {
        self.get_json(&["sales"], &[]).await
    }

    pub async fn fetch_recent_sales(&self) -> Result<Vec<Sale>, ApiError> {
        self.get_json(&["sales", "recent"], &[]).await
    }

    pub async fn fetch_total_revenue(&self) -> Result<RevenueSummary, ApiError> {
        self.get_json(&["sales", "revenue", "total"], &[]).await
    }

    pub async fn fetch_revenue_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<RevenueSummary, ApiError> {
        self.get_json(&["sales", "revenue", "period"], &period_query(start, end)).await
    }

    /// Backend-aggregated per-day sales for the last `days` days (usually
    /// [`super::DEFAULT_HISTORY_DAYS`]), returned as sent.
    ///
    /// No substitute series is ever produced here; see `dashboard::fallback`
    /// for the presentation-side fallback.
    pub async fn fetch_sales_history(&self, days: u32) -> Result<Vec<DailyTrendPoint>, ApiError> {
        self.get_json(&["sales", "history", "daily-trend"], &[("days", days.to_string())]).await
    }
}
