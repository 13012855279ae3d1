// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Loose, Order};

struct SeedRow {
    id: i64,
    customer: &'static str,
    product_name: &'static str,
    category: &'static str,
    sub_category: &'static str,
    description: &'static str,
    price: f64,
    old_price: f64,
    available_stock: i64,
    quantity: i64,
    status: &'static str,
    total: f64,
}

const SEED_ROWS: [SeedRow; 3] = [
    SeedRow {
        id: 1,
        customer: "John Doe",
        product_name: "Milk",
        category: "Dairy",
        sub_category: "Organic",
        description: "Fresh organic milk",
        price: 5.0,
        old_price: 6.0,
        available_stock: 100,
        quantity: 10,
        status: "Shipped",
        total: 150.0,
    },
    SeedRow {
        id: 2,
        customer: "Jane Smith",
        product_name: "Cheese",
        category: "Dairy",
        sub_category: "Aged",
        description: "Aged cheddar cheese",
        price: 8.0,
        old_price: 10.0,
        available_stock: 50,
        quantity: 5,
        status: "Pending",
        total: 200.0,
    },
    SeedRow {
        id: 3,
        customer: "Alice Johnson",
        product_name: "Butter",
        category: "Dairy",
        sub_category: "Salted",
        description: "Creamy salted butter",
        price: 4.0,
        old_price: 5.0,
        available_stock: 70,
        quantity: 8,
        status: "Delivered",
        total: 100.0,
    },
];

/// The fixed sample orders every view starts with.
pub fn sample_orders() -> Vec<Order> {
    SEED_ROWS
        .iter()
        .map(|row| Order {
            id: Loose::Typed(row.id),
            customer: row.customer.to_owned(),
            product_name: row.product_name.to_owned(),
            category: row.category.to_owned(),
            sub_category: row.sub_category.to_owned(),
            description: row.description.to_owned(),
            price: Loose::Typed(row.price),
            old_price: Loose::Typed(row.old_price),
            available_stock: Loose::Typed(row.available_stock),
            quantity: Loose::Typed(row.quantity),
            status: row.status.to_owned(),
            total: Loose::Typed(row.total),
        })
        .collect()
}
