//! The status client proper: one connection, one document, one event at a time.
//!
//! Adapters translate whatever their platform delivers (browser socket
//! callbacks, tungstenite frames, button clicks, unload) into [`FeedEvent`]s
//! and hand them to [`StatusClient::handle`] in arrival order.

use crate::config::FeedConfig;
use crate::render::{apply_record, MessageOutcome, SiteDocument};
use crate::types::{ConnectionState, SiteStatusRecord};
use crate::FeedError;

/// Outbound side of the feed connection.
pub trait FeedTransport {
    fn send_text(&self, text: &str) -> Result<(), FeedError>;

    /// Close with the transport's default code and reason.
    fn close(&self) -> Result<(), FeedError>;

    fn close_with(&self, code: u16, reason: &str) -> Result<(), FeedError>;
}

/// Everything the client reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    Opened,
    Message(String),
    Closed {
        code: u16,
        reason: String,
        was_clean: bool,
    },
    Errored,
    /// "try close" control.
    CloseRequested,
    /// "try send" control.
    SendRequested,
    /// Page or process is going away.
    Teardown,
}

/// Result of handling one [`FeedEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handled {
    Message(MessageOutcome),
    StateChanged(ConnectionState),
    Sent,
}

/// Close the transport the way a departing page does.
///
/// Shared with adapters that must close synchronously from an unload hook,
/// outside the event queue.
pub fn close_for_teardown<T: FeedTransport>(
    transport: &T,
    config: &FeedConfig,
) -> Result<(), FeedError> {
    transport.close_with(config.close_code, &config.close_reason)
}

#[derive(Debug)]
pub struct StatusClient<T, D> {
    transport: T,
    document: D,
    config: FeedConfig,
    state: ConnectionState,
}

impl<T: FeedTransport, D: SiteDocument> StatusClient<T, D> {
    pub fn new(transport: T, document: D, config: FeedConfig) -> Self {
        Self {
            transport,
            document,
            config,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn handle(&mut self, event: FeedEvent) -> Result<Handled, FeedError> {
        match event {
            FeedEvent::Opened => {
                tracing::debug!("websocket ready");
                Ok(self.transition(ConnectionState::Open))
            }
            FeedEvent::Message(raw) => self.handle_message(&raw).map(Handled::Message),
            FeedEvent::Closed {
                code,
                reason,
                was_clean,
            } => {
                tracing::info!(code, reason = %reason, was_clean, "Status feed closed");
                Ok(self.transition(ConnectionState::Closed))
            }
            FeedEvent::Errored => {
                tracing::warn!(state = self.state.as_str(), "Status feed error");
                Ok(Handled::StateChanged(self.state))
            }
            FeedEvent::CloseRequested => self.close(),
            FeedEvent::SendRequested => self.send_test(),
            FeedEvent::Teardown => self.teardown(),
        }
    }

    /// Decode one inbound frame and reflect it into the document.
    pub fn handle_message(&mut self, raw: &str) -> Result<MessageOutcome, FeedError> {
        if !self.state.accepts_messages() {
            tracing::debug!(state = self.state.as_str(), "Dropping message after close");
            return Ok(MessageOutcome::Ignored);
        }

        let record = SiteStatusRecord::decode(raw)?;
        let outcome = apply_record(&mut self.document, &record)?;
        match &outcome {
            MessageOutcome::Updated { domain, status } => {
                tracing::debug!(
                    domain = %domain,
                    status = %status,
                    last_check = record.last_check.as_deref().unwrap_or("-"),
                    "Site status updated"
                );
            }
            MessageOutcome::Unmatched { domain } => {
                tracing::debug!(domain = %domain, "No element for domain, update dropped");
            }
            MessageOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// "try close": default code and reason, no double-close guard.
    pub fn close(&mut self) -> Result<Handled, FeedError> {
        self.transport.close()?;
        Ok(self.transition(ConnectionState::Closing))
    }

    /// "try send": the fixed test payload, whatever the connection state.
    pub fn send_test(&mut self) -> Result<Handled, FeedError> {
        self.transport.send_text(&self.config.test_payload)?;
        Ok(Handled::Sent)
    }

    pub fn teardown(&mut self) -> Result<Handled, FeedError> {
        close_for_teardown(&self.transport, &self.config)?;
        Ok(self.transition(ConnectionState::Closing))
    }

    /// Only moves forward: `Connecting -> Open -> Closing -> Closed`. A late
    /// open after the close control or teardown leaves the client closing.
    fn transition(&mut self, next: ConnectionState) -> Handled {
        let allowed = match next {
            ConnectionState::Connecting => false,
            ConnectionState::Open => self.state == ConnectionState::Connecting,
            ConnectionState::Closing => self.state != ConnectionState::Closed,
            ConnectionState::Closed => true,
        };
        if allowed {
            self.state = next;
        }
        Handled::StateChanged(self.state)
    }
}
