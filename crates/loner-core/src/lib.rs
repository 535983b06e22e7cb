//! Core data model for the Loner chat client.
//!
//! Defines the types shared by the synchronization state machine and the
//! transport adapters: message identity and ordering, the unified timeline,
//! the wire contracts of the history API and the live channel, and the
//! connection lifecycle classification.
//!
//! Everything in this crate is pure data and pure logic - no I/O, no async.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod connection;
mod error;
mod message;
mod session;
mod timeline;
mod wire;

pub use connection::{CloseReason, ConnectionState};
pub use error::{HistoryError, SendError};
pub use message::{Message, MessageId, RoomId};
pub use session::SessionContext;
pub use timeline::Timeline;
pub use wire::{HistoryPage, LiveEvent, OutboundText};
