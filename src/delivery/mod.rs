//! The seam between envelope assembly and transport.
//!
//! Transmission (HTTP, socket, queued/batched senders) lives entirely in
//! [`Delivery`] implementations. The client only builds envelopes and
//! forwards them.

pub mod memory;

pub use memory::MemoryDelivery;

use crate::envelope::{Envelope, EventKind};

/// A collaborator that transmits envelopes.
///
/// Each event method receives one complete envelope and reports success.
/// Buffering collaborators advertise flush via [`Delivery::supports_flush`];
/// the client reads it once at construction.
pub trait Delivery {
    fn track(&mut self, envelope: Envelope) -> bool;
    fn identify(&mut self, envelope: Envelope) -> bool;
    fn group(&mut self, envelope: Envelope) -> bool;
    fn page(&mut self, envelope: Envelope) -> bool;
    fn screen(&mut self, envelope: Envelope) -> bool;
    fn alias(&mut self, envelope: Envelope) -> bool;

    fn supports_flush(&self) -> bool {
        false
    }

    fn flush(&mut self) {}

    /// Called exactly once when the owning client is disposed.
    fn teardown(&mut self);
}

/// Routes an envelope to the method matching `kind`.
pub fn deliver<D: Delivery + ?Sized>(delivery: &mut D, kind: EventKind, envelope: Envelope) -> bool {
    match kind {
        EventKind::Track => delivery.track(envelope),
        EventKind::Identify => delivery.identify(envelope),
        EventKind::Group => delivery.group(envelope),
        EventKind::Page => delivery.page(envelope),
        EventKind::Screen => delivery.screen(envelope),
        EventKind::Alias => delivery.alias(envelope),
    }
}

impl<D: Delivery + ?Sized> Delivery for Box<D> {
    fn track(&mut self, envelope: Envelope) -> bool {
        (**self).track(envelope)
    }

    fn identify(&mut self, envelope: Envelope) -> bool {
        (**self).identify(envelope)
    }

    fn group(&mut self, envelope: Envelope) -> bool {
        (**self).group(envelope)
    }

    fn page(&mut self, envelope: Envelope) -> bool {
        (**self).page(envelope)
    }

    fn screen(&mut self, envelope: Envelope) -> bool {
        (**self).screen(envelope)
    }

    fn alias(&mut self, envelope: Envelope) -> bool {
        (**self).alias(envelope)
    }

    fn supports_flush(&self) -> bool {
        (**self).supports_flush()
    }

    fn flush(&mut self) {
        (**self).flush()
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }
}

impl<D: Delivery + ?Sized> Delivery for &mut D {
    fn track(&mut self, envelope: Envelope) -> bool {
        (**self).track(envelope)
    }

    fn identify(&mut self, envelope: Envelope) -> bool {
        (**self).identify(envelope)
    }

    fn group(&mut self, envelope: Envelope) -> bool {
        (**self).group(envelope)
    }

    fn page(&mut self, envelope: Envelope) -> bool {
        (**self).page(envelope)
    }

    fn screen(&mut self, envelope: Envelope) -> bool {
        (**self).screen(envelope)
    }

    fn alias(&mut self, envelope: Envelope) -> bool {
        (**self).alias(envelope)
    }

    fn supports_flush(&self) -> bool {
        (**self).supports_flush()
    }

    fn flush(&mut self) {
        (**self).flush()
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }
}
