//! Turning raw text input into the primitives the API client expects.
//!
//! The client never reinterprets what it is given, so every coercion rule
//! lives here on the caller side.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{NewProduct, NewSale};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

/// Whole number, blank or garbage becomes 0.
pub fn parse_quantity(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(0)
}

/// Low stock threshold, blank or garbage becomes 10.
pub fn parse_threshold(raw: &str) -> i64 {
    parse_int(raw).unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
}

/// Blank means "not set" and becomes `None` (sent as `null`), never `0` or `""`.
pub fn parse_price(field: &'static str, raw: &str) -> Result<Option<f64>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| FormError::InvalidNumber { field, value: trimmed.to_string() })
}

pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// Leading integer, the way a browser's parseInt reads "12 units" as 12.
fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub quantity_on_hand: String,
    pub low_stock_threshold: String,
    pub price: String,
    pub cost_price: String,
}

impl ProductForm {
    pub fn to_new_product(&self) -> Result<NewProduct, FormError> {
        let name = optional_text(&self.name).ok_or(FormError::Required("name"))?;
        let sku = optional_text(&self.sku).ok_or(FormError::Required("sku"))?;

        Ok(NewProduct {
            name,
            sku,
            quantity_on_hand: parse_quantity(&self.quantity_on_hand),
            low_stock_threshold: parse_threshold(&self.low_stock_threshold),
            price: parse_price("price", &self.price)?,
            cost_price: parse_price("costPrice", &self.cost_price)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SaleForm {
    pub product_id: Option<i64>,
    pub quantity_sold: String,
    pub unit_price: String,
    pub customer_name: String,
    pub notes: String,
}

impl SaleForm {
    pub fn to_new_sale(&self) -> Result<NewSale, FormError> {
        let product_id = self.product_id.ok_or(FormError::Required("product"))?;

        let raw_qty = self.quantity_sold.trim();
        if raw_qty.is_empty() {
            return Err(FormError::Required("quantitySold"));
        }
        let quantity_sold = parse_int(raw_qty).ok_or_else(|| FormError::InvalidNumber {
            field: "quantitySold",
            value: raw_qty.to_string(),
        })?;
        if quantity_sold <= 0 {
            return Err(FormError::NotPositive { field: "quantitySold" });
        }

        Ok(NewSale {
            product_id,
            quantity_sold,
            unit_price: parse_price("unitPrice", &self.unit_price)?,
            customer_name: optional_text(&self.customer_name),
            notes: optional_text(&self.notes),
        })
    }
}
