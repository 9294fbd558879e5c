use super::Delivery;
use crate::envelope::{Envelope, EventKind};

/// Records every envelope it receives instead of transmitting it.
///
/// Useful for inspecting what a client would send, and as a test double.
#[derive(Debug, Clone)]
pub struct MemoryDelivery {
    result: bool,
    flushable: bool,
    sent: Vec<(EventKind, Envelope)>,
    flushes: usize,
    teardowns: usize,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self {
            result: true,
            flushable: false,
            sent: Vec::new(),
            flushes: 0,
            teardowns: 0,
        }
    }

    /// Value returned from every event method.
    pub fn with_result(mut self, result: bool) -> Self {
        self.result = result;
        self
    }

    pub fn flushable(mut self) -> Self {
        self.flushable = true;
        self
    }

    pub fn set_result(&mut self, result: bool) {
        self.result = result;
    }

    /// Envelopes in arrival order, tagged with the method that received them.
    pub fn sent(&self) -> &[(EventKind, Envelope)] {
        &self.sent
    }

    pub fn last(&self) -> Option<&Envelope> {
        self.sent.last().map(|(_, envelope)| envelope)
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }

    fn record(&mut self, kind: EventKind, envelope: Envelope) -> bool {
        self.sent.push((kind, envelope));
        self.result
    }
}

impl Default for MemoryDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl Delivery for MemoryDelivery {
    fn track(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Track, envelope)
    }

    fn identify(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Identify, envelope)
    }

    fn group(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Group, envelope)
    }

    fn page(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Page, envelope)
    }

    fn screen(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Screen, envelope)
    }

    fn alias(&mut self, envelope: Envelope) -> bool {
        self.record(EventKind::Alias, envelope)
    }

    fn supports_flush(&self) -> bool {
        self.flushable
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }
}
