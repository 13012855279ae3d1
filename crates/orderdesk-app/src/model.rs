// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::OrderField;

/// A field value that is either typed or the raw text a user typed into it.
///
/// Edits never parse: numeric fields take whatever text arrives and keep it
/// as `Text` until something replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loose<T> {
    Typed(T),
    Text(String),
}

impl<T> Loose<T> {
    pub const fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl<T> From<T> for Loose<T> {
    fn from(value: T) -> Self {
        Self::Typed(value)
    }
}

impl<T: fmt::Display> fmt::Display for Loose<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

pub type OrderKey = Loose<i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderKey,
    pub customer: String,
    pub product_name: String,
    pub category: String,
    pub sub_category: String,
    pub description: String,
    pub price: Loose<f64>,
    pub old_price: Loose<f64>,
    pub available_stock: Loose<i64>,
    pub quantity: Loose<i64>,
    pub status: String,
    /// Stored line total. Never derived from price and quantity.
    pub total: Loose<f64>,
}

impl Order {
    pub fn field_text(&self, field: OrderField) -> String {
        match field {
            OrderField::Id => self.id.to_string(),
            OrderField::Customer => self.customer.clone(),
            OrderField::ProductName => self.product_name.clone(),
            OrderField::Category => self.category.clone(),
            OrderField::SubCategory => self.sub_category.clone(),
            OrderField::Description => self.description.clone(),
            OrderField::Price => self.price.to_string(),
            OrderField::OldPrice => self.old_price.to_string(),
            OrderField::AvailableStock => self.available_stock.to_string(),
            OrderField::Quantity => self.quantity.to_string(),
            OrderField::Status => self.status.clone(),
            OrderField::Total => self.total.to_string(),
        }
    }

    /// Writes `value` into `field` as-is. Numeric fields always become
    /// `Loose::Text`, even when the text would parse.
    pub fn set_field_text(&mut self, field: OrderField, value: String) {
        match field {
            OrderField::Id => self.id = Loose::Text(value),
            OrderField::Customer => self.customer = value,
            OrderField::ProductName => self.product_name = value,
            OrderField::Category => self.category = value,
            OrderField::SubCategory => self.sub_category = value,
            OrderField::Description => self.description = value,
            OrderField::Price => self.price = Loose::Text(value),
            OrderField::OldPrice => self.old_price = Loose::Text(value),
            OrderField::AvailableStock => self.available_stock = Loose::Text(value),
            OrderField::Quantity => self.quantity = Loose::Text(value),
            OrderField::Status => self.status = value,
            OrderField::Total => self.total = Loose::Text(value),
        }
    }
}
