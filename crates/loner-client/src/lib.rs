//! Sans-IO synchronization client for Loner chat rooms.
//!
//! The [`ChatClient`] is a pure state machine: the caller feeds it
//! [`ClientEvent`] inputs (socket lifecycle, live payloads, fetch
//! completions, scroll reports) and executes the [`ClientAction`] outputs
//! (connect, send, fetch, scroll). All protocol and reconciliation logic
//! lives here; I/O lives behind the optional `transport` feature or in the
//! embedding application's driver.
//!
//! # Components
//!
//! - [`ChatClient`]: reconciler and sole owner of the room timeline
//! - [`HistoryCursor`]: backward pagination with single-in-flight fetches
//! - [`ScrollCoordinator`]: pin-to-newest and load-older-history decisions

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod event;
mod history;
mod scroll;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::ChatClient;
pub use event::{ClientAction, ClientEvent, NoticeKind, ScrollMetrics};
pub use history::HistoryCursor;
pub use scroll::ScrollCoordinator;
