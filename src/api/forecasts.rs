use serde_json::Value;
use super::{ApiClient, ApiError};
use crate::models::ForecastResult;

impl ApiClient {
    /// Projected units over the next `days`; the dashboard asks for
    /// [`super::DEFAULT_FORECAST_DAYS`] when no horizon is picked.
    pub async fn fetch_forecast(&self, product_id: i64, days: u32) -> Result<ForecastResult, ApiError> {
        self.get_json(
            &["forecasts", "product", &product_id.to_string()],
            &[("days", days.to_string())],
        )
        .await
    }

    /// Shape is backend defined, so it is handed back untyped.
    pub async fn fetch_predicted_revenue(&self, days: u32) -> Result<Value, ApiError> {
        self.get_json(&["forecasts", "revenue"], &[("days", days.to_string())]).await
    }
}
