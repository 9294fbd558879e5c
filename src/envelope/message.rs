use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::ops::Deref;

use super::context::{merge_context, LibraryInfo};
use super::kind::EventKind;
use super::message_id::message_id;
use super::timestamp::{format_time, FractionStyle};
use crate::config::{ClientConfig, ConfigError};

pub const TYPE_KEY: &str = "type";
pub const CONTEXT_KEY: &str = "context";
pub const TIMESTAMP_KEY: &str = "timestamp";
pub const MESSAGE_ID_KEY: &str = "messageId";

/// Caller-supplied partial event data.
pub type Message = Map<String, Value>;

/// A fully normalized event, ready to hand to a [`crate::Delivery`].
///
/// Only [`EnvelopeBuilder`] creates envelopes, so every instance carries
/// `type`, `context.library`, `timestamp` and `messageId`. Serialize-only:
/// there is no way to materialize one from arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(Message);

impl Envelope {
    pub fn kind(&self) -> Option<EventKind> {
        self.0.get(TYPE_KEY)?.as_str()?.parse().ok()
    }

    pub fn message_id(&self) -> Option<&str> {
        self.0.get(MESSAGE_ID_KEY)?.as_str()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.0.get(TIMESTAMP_KEY)?.as_str()
    }

    pub fn context(&self) -> Option<&Map<String, Value>> {
        self.0.get(CONTEXT_KEY)?.as_object()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Message {
        &self.0
    }

    pub fn into_inner(self) -> Message {
        self.0
    }
}

impl Deref for Envelope {
    type Target = Message;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        Value::Object(envelope.0)
    }
}

/// Turns partial caller data into envelopes.
///
/// Holds the library identity and clock settings, resolved once from
/// [`ClientConfig`] and immutable afterwards.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    library: LibraryInfo,
    offset: FixedOffset,
    fraction_style: FractionStyle,
}

impl EnvelopeBuilder {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            library: config.library.clone(),
            offset: config.offset()?,
            fraction_style: config.fraction_style,
        })
    }

    pub fn library(&self) -> &LibraryInfo {
        &self.library
    }

    pub fn offset(&self) -> &FixedOffset {
        &self.offset
    }

    pub fn fraction_style(&self) -> FractionStyle {
        self.fraction_style
    }

    /// Caller fields pass through; `context`, `timestamp`, `messageId` and
    /// `type` are always (re)written.
    pub fn build(&self, kind: EventKind, mut message: Message) -> Envelope {
        let context = merge_context(message.remove(CONTEXT_KEY), &self.library);
        let timestamp = format_time(message.get(TIMESTAMP_KEY), &self.offset, self.fraction_style);

        message.insert(CONTEXT_KEY.to_string(), Value::Object(context));
        message.insert(TIMESTAMP_KEY.to_string(), Value::String(timestamp));
        message.insert(MESSAGE_ID_KEY.to_string(), Value::String(message_id()));
        message.insert(TYPE_KEY.to_string(), Value::String(kind.as_str().to_string()));

        Envelope(message)
    }
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self {
            library: LibraryInfo::current(),
            offset: Utc.fix(),
            fraction_style: FractionStyle::default(),
        }
    }
}
