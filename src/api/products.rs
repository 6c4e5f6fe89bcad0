use reqwest::Method;
use super::{ApiClient, ApiError};
use crate::models::{NewProduct, Product, ProductRevenue, Sale, StockAddition, StockInvestment};

impl ApiClient {
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json(&["products"], &[]).await
    }

    pub async fn fetch_product(&self, id: i64) -> Result<Product, ApiError> {
        self.get_json(&["products", &id.to_string()], &[]).await
    }

    /// Create a product; `price`/`cost_price` of `None` go out as `null`.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.send_json(Method::POST, &["products"], product).await
    }

    pub async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product, ApiError> {
        self.send_json(Method::PUT, &["products", &id.to_string()], product).await
    }

    /// Fails (typically 400 with an `error` field) while sales still reference the product.
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&["products", &id.to_string()]).await
    }

    /// Delete the product together with every sale recorded against it.
    pub async fn force_delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&["products", &id.to_string(), "force"]).await
    }

    pub async fn discontinue_product(&self, id: i64) -> Result<Product, ApiError> {
        self.send_empty(Method::PUT, &["products", &id.to_string(), "discontinue"], &[]).await
    }

    pub async fn reactivate_product(&self, id: i64) -> Result<Product, ApiError> {
        self.send_empty(Method::PUT, &["products", &id.to_string(), "reactivate"], &[]).await
    }

    pub async fn add_stock(&self, id: i64, quantity: i64) -> Result<Product, ApiError> {
        let body = StockAddition { quantity };
        self.send_json(Method::POST, &["products", &id.to_string(), "add-stock"], &body).await
    }

    pub async fn fetch_stock_investment(&self) -> Result<StockInvestment, ApiError> {
        self.get_json(&["products", "stock-investment"], &[]).await
    }

    pub async fn fetch_product_revenue(&self, id: i64) -> Result<ProductRevenue, ApiError> {
        self.get_json(&["products", &id.to_string(), "revenue"], &[]).await
    }

    pub async fn fetch_product_sales(&self, id: i64) -> Result<Vec<Sale>, ApiError> {
        self.get_json(&["products", &id.to_string(), "sales"], &[]).await
    }
}
