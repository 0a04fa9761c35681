//! Group event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`GroupEvent`]: the envelope carried to every subscriber; the
//!   WebSocket layer forwards it to clients that joined the event's
//!   group.
//!
//! Delivery is fire-and-forget, at-most-once: no persistence, no
//! replay, and a client subscribed after publication never sees the
//! event.

pub mod bus;

pub use bus::{EventBus, GroupEvent, CONTENT_ADDED, CONTENT_REMOVED};
