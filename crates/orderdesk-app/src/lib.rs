// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod badge;
pub mod fields;
pub mod model;
pub mod seed;
pub mod view;

pub use badge::*;
pub use fields::*;
pub use model::*;
pub use seed::*;
pub use view::*;
