//! Application layer for the Loner chat client.
//!
//! Wraps the sans-IO [`loner_client::ChatClient`] with the presentation
//! state a UI needs (timed notices, persistent close explanations, the
//! send-control flag) and a generic orchestration loop, so the same code
//! runs against a production transport and a deterministic test driver.
//!
//! # Components
//!
//! - [`App`]: UI-facing state machine and the imperative entry points
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic event loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod runtime;

pub use action::AppAction;
pub use app::{App, NOTICE_TTL};
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
