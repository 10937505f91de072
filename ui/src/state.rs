use dioxus::prelude::*;
use status_common::types::ConnectionState;

// --- Global signals ---

/// Connection state as last seen by the client task
pub static FEED_STATE: GlobalSignal<ConnectionState> = Global::new(ConnectionState::default);
