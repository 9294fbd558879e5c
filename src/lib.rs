//! Client-side analytics event tracking.
//!
//! [`Client`] accepts partial track/identify/group/page/screen/alias
//! messages, completes them into [`Envelope`]s (type, library context,
//! ISO-8601 timestamp, v4 message id) and forwards each one to an injected
//! [`Delivery`] that owns the actual transport.

pub mod client;
pub mod config;
pub mod delivery;
pub mod envelope;

pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use delivery::{Delivery, MemoryDelivery};
pub use envelope::{
    Envelope, EventKind, FractionStyle, LibraryInfo, Message, LIBRARY_NAME, LIBRARY_VERSION,
};
