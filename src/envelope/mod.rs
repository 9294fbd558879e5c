pub mod kind;
pub mod message;
pub mod message_id;
pub mod context;
pub mod timestamp;

pub use kind::*;
pub use message::*;
pub use message_id::*;
pub use context::*;
pub use timestamp::*;
