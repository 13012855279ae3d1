// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Blue,
    Yellow,
    Green,
    Red,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub tone: BadgeTone,
    pub text: String,
}

/// Maps an order status label to its badge. Matching is exact and
/// case-sensitive; unknown labels get the neutral tone and keep their text.
pub fn status_badge(label: &str) -> StatusBadge {
    let tone = match label {
        "Shipped" => BadgeTone::Blue,
        "Pending" => BadgeTone::Yellow,
        "Delivered" => BadgeTone::Green,
        "Cancelled" => BadgeTone::Red,
        _ => BadgeTone::Neutral,
    };
    StatusBadge {
        tone,
        text: label.to_owned(),
    }
}
