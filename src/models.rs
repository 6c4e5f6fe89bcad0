use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use chrono::NaiveDateTime;

/// Fields the backend sends that this crate does not model. Kept so a payload
/// can be handed back to a caller (or re-serialized) unchanged.
pub type Extra = Map<String, Value>;

/// A response field that may be missing, explicitly `null`, or set.
///
/// Response models use this instead of `Option` so that re-serializing a
/// payload writes back exactly the keys the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Copy> Nullable<T> {
    pub fn get(&self) -> Option<T> {
        self.as_ref().copied()
    }
}

impl Nullable<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.as_ref().map(String::as_str)
    }
}

impl Nullable<Number> {
    pub fn as_f64(&self) -> Option<f64> {
        self.as_ref().and_then(Number::as_f64)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Nullable::Null, Nullable::Value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(v) => v.serialize(serializer),
            // Absent is skipped by `skip_serializing_if` before it gets here.
            Nullable::Null | Nullable::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sku: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub quantity_on_hand: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub low_stock_threshold: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub price: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub cost_price: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub discontinued: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Product {
    /// At or below its threshold. A product missing either number is never low.
    pub fn is_low_stock(&self) -> bool {
        match (self.quantity_on_hand.get(), self.low_stock_threshold.get()) {
            (Some(qty), Some(threshold)) => qty <= threshold,
            _ => false,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn sku(&self) -> &str {
        self.sku.as_deref().unwrap_or("")
    }
}

/// Body for `POST /products` and `PUT /products/{id}`.
///
/// `price` and `cost_price` are always written, as `null` when unset, so the
/// backend can tell "not set" apart from zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub quantity_on_hand: i64,
    pub low_stock_threshold: i64,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub product_id: Nullable<i64>,
    // Sale records straight from the entity carry the whole product instead of an id.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub product: Nullable<Product>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub quantity_sold: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub unit_price: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_amount: Nullable<Number>,
    /// Kept as sent; see [`Sale::sold_at`].
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub timestamp: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub customer_name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub notes: Nullable<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Sale {
    /// Product id, whichever way the backend chose to send it.
    pub fn product_ref(&self) -> Option<i64> {
        self.product_id.get().or_else(|| self.product.as_ref().map(|p| p.id))
    }

    pub fn sold_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_local_timestamp)
    }
}

fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>().ok()
}

/// Body for `POST /sales`. Unset optional fields are written as `null`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: i64,
    pub quantity_sold: i64,
    pub unit_price: Option<f64>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
}

/// Body for `POST /products/{id}/add-stock`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct StockAddition {
    pub quantity: i64,
}

/// Forecast endpoint payload. Older backends answer with a bare number,
/// newer ones with an object; either is kept in the shape it arrived in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ForecastResult {
    Units(Number),
    Detailed(ForecastDetail),
}

impl ForecastResult {
    pub fn forecast(&self) -> Option<f64> {
        match self {
            ForecastResult::Units(n) => n.as_f64(),
            ForecastResult::Detailed(detail) => detail.forecast.as_f64(),
        }
    }

    pub fn detail(&self) -> Option<&ForecastDetail> {
        match self {
            ForecastResult::Units(_) => None,
            ForecastResult::Detailed(detail) => Some(detail),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDetail {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub forecast: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub average_daily_sales: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub trend: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub confidence: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub message: Nullable<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    Create,
    Update,
    Delete,
    Sale,
    StockAdjustment,
    #[serde(other)]
    Other,
}

impl LogAction {
    /// Path segment used by `GET /logs/action/{action}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Create => "CREATE",
            LogAction::Update => "UPDATE",
            LogAction::Delete => "DELETE",
            LogAction::Sale => "SALE",
            LogAction::StockAdjustment => "STOCK_ADJUSTMENT",
            LogAction::Other => "OTHER",
        }
    }

    pub fn parse(raw: &str) -> LogAction {
        match raw {
            "CREATE" => LogAction::Create,
            "UPDATE" => LogAction::Update,
            "DELETE" => LogAction::Delete,
            "SALE" => LogAction::Sale,
            "STOCK_ADJUSTMENT" => LogAction::StockAdjustment,
            _ => LogAction::Other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Product,
    SaleRecord,
    #[serde(other)]
    Other,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Product => "PRODUCT",
            EntityType::SaleRecord => "SALE_RECORD",
            EntityType::Other => "OTHER",
        }
    }

    pub fn parse(raw: &str) -> EntityType {
        match raw {
            "PRODUCT" => EntityType::Product,
            "SALE_RECORD" => EntityType::SaleRecord,
            _ => EntityType::Other,
        }
    }
}

/// One audit log row. `action` and `entity_type` keep the backend's spelling,
/// including values this crate has no variant for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub timestamp: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub action: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub entity_type: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub entity_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub user_name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub details: Nullable<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl LogEntry {
    pub fn log_action(&self) -> LogAction {
        self.action.as_deref().map_or(LogAction::Other, LogAction::parse)
    }

    pub fn entity(&self) -> EntityType {
        self.entity_type.as_deref().map_or(EntityType::Other, EntityType::parse)
    }

    pub fn logged_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_local_timestamp)
    }
}

/// Page envelope returned by `GET /logs?page=&size=`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub content: Nullable<Vec<LogEntry>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_pages: Nullable<u32>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_elements: Nullable<u64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub number: Nullable<u32>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub size: Nullable<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl LogPage {
    pub fn entries(&self) -> &[LogEntry] {
        self.content.as_ref().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pages to offer for navigation; an envelope without a count is one page.
    pub fn page_count(&self) -> u32 {
        self.total_pages.get().unwrap_or(1)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_revenue: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_sales: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_quantity_sold: Nullable<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl RevenueSummary {
    pub fn revenue(&self) -> f64 {
        self.total_revenue.as_f64().unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_revenue: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_quantity_sold: Nullable<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StockInvestment {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub current_stock_investment: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sold_stock_investment: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_investment: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub current_units: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sold_units: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub total_units: Nullable<Number>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub average_cost_per_unit: Nullable<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One bucket of the backend's daily sales trend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyTrendPoint {
    /// Date exactly as the backend sent it (`2024-01-05` or a full timestamp).
    pub date: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub sales: Nullable<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DailyTrendPoint {
    pub fn new(date: impl Into<String>, sales: impl Into<Number>) -> Self {
        DailyTrendPoint { date: date.into(), sales: Nullable::Value(sales.into()), extra: Extra::new() }
    }

    pub fn day(&self) -> Option<chrono::NaiveDate> {
        let date_str = self.date.get(..10)?;
        chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
    }

    /// Sales as a plotting value; a missing or null count plots as zero.
    pub fn sales(&self) -> f64 {
        self.sales.as_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip<T: serde::de::DeserializeOwned + Serialize>(payload: &Value) -> Value {
        let typed: T = serde_json::from_value(payload.clone()).unwrap();
        serde_json::to_value(&typed).unwrap()
    }

    #[test]
    fn test_product_passes_through_unchanged() {
        let bare = json!({ "id": 42, "name": "Widget", "sku": "W-1" });
        assert_eq!(round_trip::<Product>(&bare), bare);

        let nulls = json!({ "id": 7, "name": "Bolt", "sku": "B-7", "price": null, "costPrice": null, "supplier": "Acme" });
        assert_eq!(round_trip::<Product>(&nulls), nulls);

        let product: Product = serde_json::from_value(nulls).unwrap();
        assert_eq!(product.price, Nullable::Null);
        assert_eq!(product.extra.get("supplier"), Some(&json!("Acme")));
    }

    #[test]
    fn test_product_without_threshold_is_not_low_stock() {
        let product: Product = serde_json::from_value(json!({ "id": 1, "quantityOnHand": 2 })).unwrap();
        assert!(product.low_stock_threshold.is_absent());
        assert!(!product.is_low_stock());

        let low: Product =
            serde_json::from_value(json!({ "id": 2, "quantityOnHand": 2, "lowStockThreshold": 5 })).unwrap();
        assert!(low.is_low_stock());
    }

    #[test]
    fn test_numbers_keep_their_form() {
        let trend = json!([{ "date": "2024-01-01", "sales": 5 }, { "date": "2024-01-02", "sales": 2.5 }]);
        assert_eq!(round_trip::<Vec<DailyTrendPoint>>(&trend), trend);

        let revenue = json!({ "totalRevenue": 120, "totalSales": 7 });
        assert_eq!(round_trip::<RevenueSummary>(&revenue), revenue);
    }

    #[test]
    fn test_new_product_writes_null_prices() {
        let product = NewProduct {
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            quantity_on_hand: 5,
            low_stock_threshold: 10,
            price: None,
            cost_price: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("price"), Some(&Value::Null));
        assert_eq!(obj.get("costPrice"), Some(&Value::Null));
    }

    #[test]
    fn test_forecast_keeps_its_shape() {
        let bare = json!(12.5);
        let forecast: ForecastResult = serde_json::from_value(bare.clone()).unwrap();
        assert_eq!(forecast.forecast(), Some(12.5));
        assert!(forecast.detail().is_none());
        assert_eq!(serde_json::to_value(&forecast).unwrap(), bare);

        let full = json!({
            "forecast": 30,
            "averageDailySales": 4.2,
            "trend": "increasing",
            "confidence": "high"
        });
        let forecast: ForecastResult = serde_json::from_value(full.clone()).unwrap();
        let detail = forecast.detail().unwrap();
        assert_eq!(detail.average_daily_sales.as_f64(), Some(4.2));
        assert_eq!(detail.confidence.as_deref(), Some("high"));
        assert_eq!(serde_json::to_value(&forecast).unwrap(), full);
    }

    #[test]
    fn test_log_entry_unknown_action_is_kept() {
        let payload = json!({
            "id": 1,
            "timestamp": "2024-03-01T10:15:30.12",
            "action": "ARCHIVE",
            "entityType": "SALE_RECORD",
            "entityId": 7,
            "description": "archived",
            "userName": "system"
        });
        let entry: LogEntry = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(entry.log_action(), LogAction::Other);
        assert_eq!(entry.entity(), EntityType::SaleRecord);
        assert!(entry.logged_at().is_some());
        assert_eq!(serde_json::to_value(&entry).unwrap(), payload);
    }

    #[test]
    fn test_log_page_defaults_are_read_side_only() {
        let page: LogPage = serde_json::from_value(json!({ "content": [] })).unwrap();
        assert_eq!(page.page_count(), 1);
        assert!(page.entries().is_empty());
        assert_eq!(serde_json::to_value(&page).unwrap(), json!({ "content": [] }));
    }

    #[test]
    fn test_sale_product_ref_from_nested_product() {
        let sale: Sale = serde_json::from_value(json!({
            "id": 3,
            "product": { "id": 9, "name": "Bolt", "sku": "B-9" },
            "quantitySold": 2,
            "totalAmount": 4.0,
            "timestamp": "2024-05-01T09:30:00"
        }))
        .unwrap();
        assert_eq!(sale.product_ref(), Some(9));
        assert_eq!(
            sale.sold_at(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(9, 30, 0))
        );
    }

    #[test]
    fn test_trend_point_day() {
        let point = DailyTrendPoint::new("2024-01-05T00:00:00", 3);
        assert_eq!(point.day(), chrono::NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(point.sales(), 3.0);
        let bad = DailyTrendPoint { date: "soon".to_string(), sales: Nullable::Null, extra: Extra::new() };
        assert!(bad.day().is_none());
        assert_eq!(bad.sales(), 0.0);
    }
}
