use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use status_common::client::{close_for_teardown, FeedEvent, FeedTransport, Handled, StatusClient};
use status_common::config::FeedConfig;
use status_common::render::MessageOutcome;
use status_common::types::ConnectionState;
use status_common::FeedError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::dom::PageDocument;
use crate::state::FEED_STATE;

use super::FeedHandle;

/// The browser socket seen as a [`FeedTransport`].
///
/// Cloning clones the JS handle, both clones drive the same connection.
#[derive(Clone, Debug)]
pub struct WebFeed {
    ws: WebSocket,
}

impl FeedTransport for WebFeed {
    fn send_text(&self, text: &str) -> Result<(), FeedError> {
        self.ws.send_with_str(text).map_err(transport_error)
    }

    fn close(&self) -> Result<(), FeedError> {
        self.ws.close().map_err(transport_error)
    }

    fn close_with(&self, code: u16, reason: &str) -> Result<(), FeedError> {
        self.ws
            .close_with_code_and_reason(code, reason)
            .map_err(transport_error)
    }
}

fn transport_error(e: JsValue) -> FeedError {
    FeedError::Transport(format!("{:?}", e))
}

/// Opens the status feed socket. Every callback only forwards a
/// [`FeedEvent`] to `feed`; nothing is processed here.
pub fn connect(config: &FeedConfig, feed: &FeedHandle) -> Result<WebFeed, FeedError> {
    let url = config.url();
    let ws = WebSocket::new(&url).map_err(transport_error)?;
    ws.set_binary_type(web_sys::BinaryType::Arraybuffer);
    tracing::info!("Connecting to status feed at {}", url);

    let feed_for_open = feed.clone();
    let onopen = Closure::<dyn FnMut()>::new(move || {
        feed_for_open.send(FeedEvent::Opened);
    });
    ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let feed_for_message = feed.clone();
    let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
        let data = e.data();
        if let Some(text) = data.as_string() {
            feed_for_message.send(FeedEvent::Message(text));
        } else if let Ok(abuf) = data.dyn_into::<js_sys::ArrayBuffer>() {
            let bytes = js_sys::Uint8Array::new(&abuf).to_vec();
            match String::from_utf8(bytes) {
                Ok(text) => feed_for_message.send(FeedEvent::Message(text)),
                Err(e) => tracing::warn!("Dropping non UTF-8 binary frame: {}", e),
            }
        }
    });
    ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let feed_for_error = feed.clone();
    let onerror = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
        feed_for_error.send(FeedEvent::Errored);
    });
    ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    let feed_for_close = feed.clone();
    let onclose = Closure::<dyn FnMut(CloseEvent)>::new(move |e: CloseEvent| {
        feed_for_close.send(FeedEvent::Closed {
            code: e.code(),
            reason: e.reason(),
            was_clean: e.was_clean(),
        });
    });
    ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    onclose.forget();

    Ok(WebFeed { ws })
}

/// Close the socket when the page is discarded.
///
/// Runs synchronously inside `beforeunload`: the event queue would never be
/// drained once the page is gone.
pub fn install_teardown(transport: WebFeed, config: FeedConfig) {
    let Some(window) = web_sys::window() else {
        tracing::warn!("No window, socket will not be closed on unload");
        return;
    };

    let onbeforeunload = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = close_for_teardown(&transport, &config) {
            tracing::warn!("Failed to close status feed on unload: {}", e);
        }
    });
    window.set_onbeforeunload(Some(onbeforeunload.as_ref().unchecked_ref()));
    onbeforeunload.forget();
}

/// Drain the event queue into the client, one event at a time.
pub async fn run(
    mut client: StatusClient<WebFeed, PageDocument>,
    mut events: UnboundedReceiver<FeedEvent>,
) {
    while let Some(event) = events.next().await {
        match client.handle(event) {
            Ok(Handled::Message(MessageOutcome::Unmatched { domain })) => {
                tracing::debug!("No site element for {}", domain);
            }
            Ok(Handled::Sent) => tracing::info!("Test message sent"),
            Ok(_) => {}
            Err(FeedError::Decode(e)) => {
                tracing::warn!("Failed to decode status message: {}", e);
            }
            Err(e) => tracing::error!("{}", e),
        }
        let state = client.state();
        if *FEED_STATE.peek() != state {
            *FEED_STATE.write() = state;
        }
    }
    tracing::debug!("Status feed queue closed");
    mark_closed().await;
}

/// Show the feed as closed on the debug controls.
pub async fn mark_closed() {
    *FEED_STATE.write() = ConnectionState::Closed;
}
