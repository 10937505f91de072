use std::fmt;

use serde::Deserialize;

use crate::FeedError;

/// One status update as pushed by the feed.
///
/// The producer sends `{"domain": "example.com", "ok": true, "last_check": "..."}`.
/// Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SiteStatusRecord {
    pub domain: String,
    pub ok: bool,
    #[serde(default)]
    pub last_check: Option<String>,
}

impl SiteStatusRecord {
    /// Decode a text frame. Both `domain` and `ok` are required.
    pub fn decode(raw: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn status(&self) -> Status {
        Status::from_ok(self.ok)
    }
}

/// Marker written on a site's element. There is no "unknown" state: an
/// element that never received an update simply has no marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Ko,
}

impl Status {
    pub fn from_ok(ok: bool) -> Self {
        if ok {
            Status::Ok
        } else {
            Status::Ko
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Ko => "ko",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the single feed connection, as observed by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closing => "closing",
            ConnectionState::Closed => "closed",
        }
    }

    /// Whether inbound status messages are still applied.
    pub fn accepts_messages(self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Open)
    }
}
