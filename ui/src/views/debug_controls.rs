#![allow(non_snake_case)]

use dioxus::prelude::*;
use status_common::client::FeedEvent;

use crate::api::FeedHandle;
use crate::state::FEED_STATE;

/// "try close" and "try send". Both stay clickable whatever the socket state;
/// the socket itself decides what a send on a closed connection does.
#[component]
pub fn DebugControls(feed: FeedHandle) -> Element {
    let state = FEED_STATE.read().as_str();
    let close_feed = feed.clone();

    rsx! {
        button {
            id: "btn",
            "data-feed-state": "{state}",
            onclick: move |_| close_feed.send(FeedEvent::CloseRequested),
            "try close"
        }
        button {
            id: "btnMsg",
            "data-feed-state": "{state}",
            onclick: move |_| feed.send(FeedEvent::SendRequested),
            "try send"
        }
    }
}
