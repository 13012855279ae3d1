// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use orderdesk_app::{Loose, Order};
use std::path::PathBuf;

const CUSTOMER_FIRST_NAMES: [&str; 12] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Rowan", "Hayden",
];
const CUSTOMER_LAST_NAMES: [&str; 12] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Turner", "Brooks",
];

const CATALOG: [(&str, &str, &str); 10] = [
    ("Milk", "Dairy", "Organic"),
    ("Cheese", "Dairy", "Aged"),
    ("Butter", "Dairy", "Salted"),
    ("Yogurt", "Dairy", "Greek"),
    ("Bread", "Bakery", "Sourdough"),
    ("Bagels", "Bakery", "Plain"),
    ("Apples", "Produce", "Gala"),
    ("Spinach", "Produce", "Baby"),
    ("Coffee", "Pantry", "Dark Roast"),
    ("Honey", "Pantry", "Raw"),
];

const STATUSES: [&str; 6] = [
    "Shipped",
    "Pending",
    "Delivered",
    "Cancelled",
    "Backordered",
    "Returned",
];

/// Fluent builder for a single order with neutral defaults.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    order: Order,
}

impl OrderBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            order: Order {
                id: Loose::Typed(id),
                customer: format!("Customer {id}"),
                product_name: "Widget".to_owned(),
                category: "General".to_owned(),
                sub_category: "Standard".to_owned(),
                description: String::new(),
                price: Loose::Typed(1.0),
                old_price: Loose::Typed(1.0),
                available_stock: Loose::Typed(10),
                quantity: Loose::Typed(1),
                status: "Pending".to_owned(),
                total: Loose::Typed(1.0),
            },
        }
    }

    pub fn customer(mut self, customer: &str) -> Self {
        self.order.customer = customer.to_owned();
        self
    }

    pub fn product(mut self, product_name: &str) -> Self {
        self.order.product_name = product_name.to_owned();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.order.status = status.to_owned();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.order.price = Loose::Typed(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.order.quantity = Loose::Typed(quantity);
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.order.total = Loose::Typed(total);
        self
    }

    pub fn build(self) -> Order {
        self.order
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Generates plausible orders from a seed; the same seed yields the same
/// orders.
#[derive(Debug, Clone)]
pub struct OrderFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl OrderFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn order(&mut self) -> Order {
        let id = self.next_id;
        self.next_id += 1;

        let (product, category, sub_category) = self.pick(&CATALOG);
        let first = self.pick(&CUSTOMER_FIRST_NAMES);
        let last = self.pick(&CUSTOMER_LAST_NAMES);
        let status = self.pick(&STATUSES);

        let price = (self.rng.int_n(2_000) as f64 + 100.0) / 100.0;
        let markup = (self.rng.int_n(300) as f64) / 100.0;
        let quantity = self.rng.int_n(20) as i64 + 1;
        let stock = self.rng.int_n(200) as i64;
        // Totals in the seed data include fees, so keep them independent here too.
        let fees = self.rng.int_n(5_000) as f64 / 100.0;

        Order {
            id: Loose::Typed(id),
            customer: format!("{first} {last}"),
            product_name: product.to_owned(),
            category: category.to_owned(),
            sub_category: sub_category.to_owned(),
            description: format!("{sub_category} {}", product.to_ascii_lowercase()),
            price: Loose::Typed(price),
            old_price: Loose::Typed(price + markup),
            available_stock: Loose::Typed(stock),
            quantity: Loose::Typed(quantity),
            status: status.to_owned(),
            total: Loose::Typed(price * quantity as f64 + fees),
        }
    }

    pub fn orders(&mut self, count: usize) -> Vec<Order> {
        (0..count).map(|_| self.order()).collect()
    }

    fn pick<T: Copy>(&mut self, values: &[T]) -> T {
        values[self.rng.int_n(values.len())]
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn recognized_statuses() -> &'static [&'static str] {
    &STATUSES[..4]
}
