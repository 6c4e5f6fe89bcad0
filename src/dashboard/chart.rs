use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::DailyTrendPoint;

/// One bar/point of the dashboard sales chart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub sales: f64,
}

/// Short axis label, `Jan 5`.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Reshape the backend trend into chart points, keeping backend order.
/// Dates that do not parse keep their raw text as the label.
pub fn chart_points(trend: &[DailyTrendPoint]) -> Vec<ChartPoint> {
    trend
        .iter()
        .map(|point| ChartPoint {
            label: point.day().map(day_label).unwrap_or_else(|| point.date.clone()),
            sales: point.sales(),
        })
        .collect()
}
