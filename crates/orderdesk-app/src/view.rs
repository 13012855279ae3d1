// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{Order, OrderField, OrderKey, StatusBadge, sample_orders, status_badge};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this order?";

/// Yes/no answer gating a delete. Resolved before the collection changes.
pub trait DeleteConfirmation {
    fn confirm(self, prompt: &str) -> bool;
}

impl DeleteConfirmation for bool {
    fn confirm(self, _prompt: &str) -> bool {
        self
    }
}

impl<F> DeleteConfirmation for F
where
    F: FnOnce(&str) -> bool,
{
    fn confirm(self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    Editing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    EditOpened(OrderKey),
    FieldUpdated(OrderField),
    /// Saved buffer contents; `replaced` is zero when the order was gone.
    Saved {
        id: OrderKey,
        replaced: usize,
    },
    EditClosed,
    Deleted {
        id: OrderKey,
        removed: usize,
    },
    DeleteDeclined(OrderKey),
    /// The operation needed an open edit and there was none.
    NoEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCell {
    Text(String),
    Badge(StatusBadge),
}

impl RowCell {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Badge(badge) => &badge.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: OrderKey,
    /// One cell per field, in `OrderField::ALL` order.
    pub cells: Vec<RowCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderTableView {
    orders: Vec<Order>,
    edit: Option<Order>,
}

impl Default for OrderTableView {
    fn default() -> Self {
        Self::seeded()
    }
}

impl OrderTableView {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders, edit: None }
    }

    pub fn seeded() -> Self {
        Self::new(sample_orders())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn edit_buffer(&self) -> Option<&Order> {
        self.edit.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        if self.edit.is_some() {
            ViewMode::Editing
        } else {
            ViewMode::Browsing
        }
    }

    pub fn rows(&self) -> Vec<OrderRow> {
        self.orders
            .iter()
            .map(|order| OrderRow {
                id: order.id.clone(),
                cells: OrderField::ALL
                    .into_iter()
                    .map(|field| match field {
                        OrderField::Status => RowCell::Badge(status_badge(&order.status)),
                        other => RowCell::Text(order.field_text(other)),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Copies `order` into the edit buffer, replacing any edit in progress.
    pub fn begin_edit(&mut self, order: &Order) -> ViewEvent {
        self.open_edit(order.clone())
    }

    pub fn begin_edit_at(&mut self, index: usize) -> Option<ViewEvent> {
        let order = self.orders.get(index)?.clone();
        Some(self.open_edit(order))
    }

    fn open_edit(&mut self, order: Order) -> ViewEvent {
        let id = order.id.clone();
        if let Some(previous) = &self.edit {
            debug!(previous = %previous.id, next = %id, "replacing open edit");
        }
        debug!(order_id = %id, "edit opened");
        self.edit = Some(order);
        ViewEvent::EditOpened(id)
    }

    pub fn update_field(&mut self, field: OrderField, value: impl Into<String>) -> ViewEvent {
        let Some(buffer) = self.edit.as_mut() else {
            return ViewEvent::NoEdit;
        };
        buffer.set_field_text(field, value.into());
        ViewEvent::FieldUpdated(field)
    }

    pub fn update_field_named(&mut self, key: &str, value: impl Into<String>) -> Result<ViewEvent> {
        let field = OrderField::parse_or_err(key)?;
        Ok(self.update_field(field, value))
    }

    /// Replaces every order whose id equals the buffer's id, then clears the
    /// buffer. A buffer whose order is gone is dropped without error.
    pub fn save(&mut self) -> ViewEvent {
        let Some(buffer) = self.edit.take() else {
            return ViewEvent::NoEdit;
        };

        let mut replaced = 0;
        for order in self.orders.iter_mut().filter(|order| order.id == buffer.id) {
            *order = buffer.clone();
            replaced += 1;
        }

        if replaced == 0 {
            warn!(order_id = %buffer.id, "save dropped; no order with this id");
        } else {
            info!(order_id = %buffer.id, replaced, "order saved");
        }
        ViewEvent::Saved {
            id: buffer.id,
            replaced,
        }
    }

    pub fn cancel_edit(&mut self) -> ViewEvent {
        if self.edit.take().is_some() {
            debug!("edit closed");
        }
        ViewEvent::EditClosed
    }

    /// Removes orders matching `id` once `confirmation` says yes. An open
    /// edit of the removed order is left in place.
    pub fn delete(&mut self, id: &OrderKey, confirmation: impl DeleteConfirmation) -> ViewEvent {
        if !confirmation.confirm(DELETE_PROMPT) {
            debug!(order_id = %id, "delete declined");
            return ViewEvent::DeleteDeclined(id.clone());
        }

        let before = self.orders.len();
        self.orders.retain(|order| &order.id != id);
        let removed = before - self.orders.len();
        info!(order_id = %id, removed, "order deleted");
        ViewEvent::Deleted {
            id: id.clone(),
            removed,
        }
    }
}
