// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};

/// Nominal input kind for an edit form field. Informational only; edits
/// are stored as typed text regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Integer,
    Decimal,
}

impl FieldInput {
    /// Short label shown beside the field in the edit form.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "int",
            Self::Decimal => "decimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Id,
    Customer,
    ProductName,
    Category,
    SubCategory,
    Description,
    Price,
    OldPrice,
    AvailableStock,
    Quantity,
    Status,
    Total,
}

impl OrderField {
    /// Declaration order. Table columns and edit form inputs follow it.
    pub const ALL: [Self; 12] = [
        Self::Id,
        Self::Customer,
        Self::ProductName,
        Self::Category,
        Self::SubCategory,
        Self::Description,
        Self::Price,
        Self::OldPrice,
        Self::AvailableStock,
        Self::Quantity,
        Self::Status,
        Self::Total,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Customer => "customer",
            Self::ProductName => "product_name",
            Self::Category => "category",
            Self::SubCategory => "sub_category",
            Self::Description => "description",
            Self::Price => "price",
            Self::OldPrice => "old_price",
            Self::AvailableStock => "available_stock",
            Self::Quantity => "quantity",
            Self::Status => "status",
            Self::Total => "total",
        }
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::Id => "Order ID",
            Self::Customer => "Customer",
            Self::ProductName => "Product Name",
            Self::Category => "Category",
            Self::SubCategory => "Sub Category",
            Self::Description => "Description",
            Self::Price => "Price ($)",
            Self::OldPrice => "Old Price ($)",
            Self::AvailableStock => "Available Stock",
            Self::Quantity => "Quantity",
            Self::Status => "Status",
            Self::Total => "Total ($)",
        }
    }

    pub const fn input(self) -> FieldInput {
        match self {
            Self::Id | Self::AvailableStock | Self::Quantity => FieldInput::Integer,
            Self::Price | Self::OldPrice | Self::Total => FieldInput::Decimal,
            Self::Customer
            | Self::ProductName
            | Self::Category
            | Self::SubCategory
            | Self::Description
            | Self::Status => FieldInput::Text,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == value)
    }

    pub fn parse_or_err(value: &str) -> Result<Self> {
        Self::parse(value).ok_or_else(|| {
            anyhow!(
                "unknown order field {value:?}; expected one of: {}",
                Self::ALL.map(Self::key).join(", ")
            )
        })
    }
}

/// Ordered `(field, input kind)` pairs the edit form is built from.
pub fn edit_form_fields() -> [(OrderField, FieldInput); 12] {
    OrderField::ALL.map(|field| (field, field.input()))
}
