use status_common::config::FeedConfig;

/// Full `ws://` / `wss://` URL replacing the default endpoint.
const FEED_URL_KEY: &str = "chouf_feed_url";

/// Close reason sent on page unload.
const CLOSE_REASON_KEY: &str = "chouf_close_reason";

/// Default feed config with any overrides stored in localStorage.
pub fn load_feed_config() -> FeedConfig {
    let config = FeedConfig::default();
    let storage = match get_storage() {
        Some(s) => s,
        None => return config,
    };

    let config = match storage.get_item(FEED_URL_KEY) {
        Ok(Some(url)) => match config.clone().with_url(&url) {
            Ok(c) => {
                tracing::info!("Using feed endpoint from localStorage: {}", c.url());
                c
            }
            Err(e) => {
                tracing::warn!("Ignoring stored {}: {}", FEED_URL_KEY, e);
                config
            }
        },
        _ => config,
    };

    match storage.get_item(CLOSE_REASON_KEY) {
        Ok(Some(reason)) => config.with_close_reason(reason),
        _ => config,
    }
}

fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
