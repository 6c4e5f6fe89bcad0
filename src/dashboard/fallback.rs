//! What the dashboard shows when the backend has no sales history to give.
//!
//! Lives on the presentation side only. The API client always reports the
//! real failure; substituting data is an explicit choice made here.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use super::chart::{day_label, ChartPoint};

pub trait SalesHistoryFallback: Send + Sync {
    fn name(&self) -> &str;

    /// Series to show instead, or `None` to let the failure through.
    fn substitute(&self, days: u32, today: NaiveDate) -> Option<Vec<ChartPoint>>;
}

/// Never substitutes; the caller sees the backend error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFallback;

impl SalesHistoryFallback for NoFallback {
    fn name(&self) -> &str {
        "none"
    }

    fn substitute(&self, _days: u32, _today: NaiveDate) -> Option<Vec<ChartPoint>> {
        None
    }
}

/// Random placeholder series, one point per day ending `today`.
#[derive(Debug, Clone, Copy)]
pub struct MockSeries {
    pub min_sales: u32,
    pub max_sales: u32,
}

impl Default for MockSeries {
    fn default() -> Self {
        MockSeries { min_sales: 5, max_sales: 20 }
    }
}

impl SalesHistoryFallback for MockSeries {
    fn name(&self) -> &str {
        "mock"
    }

    fn substitute(&self, days: u32, today: NaiveDate) -> Option<Vec<ChartPoint>> {
        let mut rng = rand::thread_rng();
        let low = self.min_sales;
        let high = self.max_sales.max(low);

        let series = (0..days)
            .rev()
            .map(|offset| {
                let day = today - Duration::days(offset as i64);
                let sales = if high > low { rng.gen_range(low..high) } else { low };
                ChartPoint { label: day_label(day), sales: sales as f64 }
            })
            .collect();

        Some(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fallback() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(NoFallback.substitute(30, today).is_none());
    }

    #[test]
    fn test_mock_series_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let series = MockSeries::default().substitute(30, today).unwrap();

        assert_eq!(series.len(), 30);
        assert_eq!(series.first().unwrap().label, "Feb 10");
        assert_eq!(series.last().unwrap().label, "Mar 10");
        assert!(series.iter().all(|p| p.sales >= 5.0 && p.sales < 20.0));
    }

    #[test]
    fn test_mock_series_degenerate_range() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = MockSeries { min_sales: 7, max_sales: 7 }.substitute(3, today).unwrap();
        assert!(series.iter().all(|p| p.sales == 7.0));
        assert_eq!(series[0].label, "Dec 30");
    }

    #[test]
    fn test_mock_series_extreme_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = MockSeries { min_sales: u32::MAX, max_sales: 3 }.substitute(2, today).unwrap();
        assert!(series.iter().all(|p| p.sales == u32::MAX as f64));

        let series = MockSeries { min_sales: u32::MAX - 1, max_sales: u32::MAX }.substitute(5, today).unwrap();
        assert!(series.iter().all(|p| p.sales == (u32::MAX - 1) as f64));
    }
}
