use tracing::{debug, trace};

use crate::config::{ClientConfig, ConfigError};
use crate::delivery::{deliver, Delivery};
use crate::envelope::{EnvelopeBuilder, EventKind, LibraryInfo, Message};

/// Analytics facade.
///
/// Every event method normalizes the caller's message into an envelope,
/// hands it to the injected [`Delivery`] and returns its result untouched.
/// Dropping the client (or calling [`Client::shutdown`]) tears the delivery
/// down exactly once.
pub struct Client<D: Delivery> {
    delivery: D,
    builder: EnvelopeBuilder,
    flushable: bool,
    torn_down: bool,
}

impl<D: Delivery> Client<D> {
    pub fn new(delivery: D) -> Self {
        Self::from_builder(delivery, EnvelopeBuilder::default())
    }

    pub fn with_config(delivery: D, config: &ClientConfig) -> Result<Self, ConfigError> {
        let builder = EnvelopeBuilder::from_config(config)?;
        Ok(Self::from_builder(delivery, builder))
    }

    fn from_builder(delivery: D, builder: EnvelopeBuilder) -> Self {
        let flushable = delivery.supports_flush();
        Self {
            delivery,
            builder,
            flushable,
            torn_down: false,
        }
    }

    /// Tracks a user action.
    pub fn track(&mut self, message: Message) -> bool {
        self.send(EventKind::Track, message)
    }

    /// Records traits about a user.
    pub fn identify(&mut self, message: Message) -> bool {
        self.send(EventKind::Identify, message)
    }

    /// Records traits about a group.
    pub fn group(&mut self, message: Message) -> bool {
        self.send(EventKind::Group, message)
    }

    pub fn page(&mut self, message: Message) -> bool {
        self.send(EventKind::Page, message)
    }

    pub fn screen(&mut self, message: Message) -> bool {
        self.send(EventKind::Screen, message)
    }

    /// Links one user id to another.
    pub fn alias(&mut self, message: Message) -> bool {
        self.send(EventKind::Alias, message)
    }

    pub fn send(&mut self, kind: EventKind, message: Message) -> bool {
        let envelope = self.builder.build(kind, message);
        debug!(
            "Dispatching {} message {}",
            kind,
            envelope.message_id().unwrap_or_default()
        );

        let delivered = deliver(&mut self.delivery, kind, envelope);
        if !delivered {
            debug!("Delivery reported failure for {} message", kind);
        }
        delivered
    }

    /// Flushes collaborators that buffer; no-op for the rest.
    pub fn flush(&mut self) {
        if !self.flushable {
            trace!("Delivery has no flush capability, skipping");
            return;
        }
        self.delivery.flush();
    }

    pub fn library(&self) -> &LibraryInfo {
        self.builder.library()
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        debug!("Tearing down delivery");
        self.delivery.teardown();
    }
}

impl<D: Delivery> Drop for Client<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
