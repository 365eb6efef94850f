//! Side channels: usage analytics and crash diagnostics.

pub mod analytics;
pub mod diagnostics;
