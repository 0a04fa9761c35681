//! Request handlers, grouped by resource.

pub mod addon;
pub mod content;
pub mod group;
