//! Application side-effects.
//!
//! Instructions produced by [`crate::App`] for the runtime to execute.
//! Notices never appear here - the App absorbs them into its own state and
//! signals a render instead.

use loner_client::ClientAction;

/// Actions produced by the App.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the current state.
    Render,

    /// Quit the application.
    Quit,

    /// Transport work delegated to the driver.
    Client(ClientAction),
}
