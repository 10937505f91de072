use serde::{Deserialize, Serialize};
use url::Url;

use crate::FeedError;

/// WebSocket close code for a normal closure.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Where the status feed lives and how the client talks to it.
///
/// Every field has a default, so a partial TOML/JSON document or an empty
/// one yields the stock `ws://localhost:3003/ws` endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedConfig {
    pub secure: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Close code sent when the page goes away.
    pub close_code: u16,
    /// Close reason sent when the page goes away. The feed never reads it.
    pub close_reason: String,
    /// Text frame sent by the "try send" control.
    pub test_payload: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            secure: false,
            host: "localhost".into(),
            port: 3003,
            path: "/ws".into(),
            close_code: NORMAL_CLOSURE,
            close_reason: "test".into(),
            test_payload: "test".into(),
        }
    }
}

impl FeedConfig {
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }

    /// Replace the endpoint with the one in `url`.
    ///
    /// Only `ws://` and `wss://` are accepted. A missing port falls back to
    /// 80/443 and the query, if any, is kept on the path. Credentials in the
    /// URL are dropped: a browser socket cannot send them.
    pub fn with_url(mut self, url: &str) -> Result<Self, FeedError> {
        let invalid = |reason: &dyn std::fmt::Display| {
            FeedError::InvalidEndpoint(format!("{}: {}", url.trim(), reason))
        };

        let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e))?;
        let secure = match parsed.scheme() {
            "ws" => false,
            "wss" => true,
            other => return Err(invalid(&format!("unsupported scheme {}", other))),
        };
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid(&"missing host"))?;
        let port = parsed
            .port_or_known_default()
            .unwrap_or(if secure { 443 } else { 80 });

        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        self.secure = secure;
        self.host = host.to_string();
        self.port = port;
        self.path = path;
        Ok(self)
    }

    pub fn with_close_reason(mut self, reason: impl Into<String>) -> Self {
        self.close_reason = reason.into();
        self
    }
}
