pub mod feed_api;
pub mod settings;

use dioxus::prelude::*;
use futures::channel::mpsc::{self, UnboundedSender};
use status_common::client::{FeedEvent, StatusClient};

use crate::dom::PageDocument;

/// Sending side of the client's event queue, handed to socket callbacks and
/// the debug controls.
#[derive(Clone, Debug)]
pub struct FeedHandle {
    tx: UnboundedSender<FeedEvent>,
}

impl FeedHandle {
    pub fn send(&self, event: FeedEvent) {
        if self.tx.unbounded_send(event).is_err() {
            tracing::debug!("Status feed task is gone, event dropped");
        }
    }
}

impl PartialEq for FeedHandle {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_receiver(&other.tx)
    }
}

/// Open the feed and start the client task. Must run inside the root
/// component so the task is owned by the Dioxus runtime.
pub fn init() -> FeedHandle {
    let (tx, rx) = mpsc::unbounded();
    let handle = FeedHandle { tx };

    let config = settings::load_feed_config();

    // init runs inside use_hook; state writes are deferred out of render
    let Some(document) = PageDocument::current() else {
        tracing::error!("No document to render site statuses into");
        spawn(feed_api::mark_closed());
        return handle;
    };

    // No retry: a socket that cannot be created stays closed
    let transport = match feed_api::connect(&config, &handle) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("Failed to create WebSocket: {}", e);
            spawn(feed_api::mark_closed());
            return handle;
        }
    };

    feed_api::install_teardown(transport.clone(), config.clone());

    let client = StatusClient::new(transport, document, config);
    spawn(feed_api::run(client, rx));

    handle
}
