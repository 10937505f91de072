#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use status_common::client::FeedTransport;
use status_common::render::SiteDocument;
use status_common::types::Status;
use status_common::FeedError;

/// A page with one element per domain, each holding an optional marker.
#[derive(Debug, Default)]
pub struct MemoryPage {
    pub sites: BTreeMap<String, Option<Status>>,
    pub writes: usize,
}

impl MemoryPage {
    pub fn with_sites(domains: &[&str]) -> Self {
        Self {
            sites: domains.iter().map(|d| (d.to_string(), None)).collect(),
            writes: 0,
        }
    }

    pub fn status_of(&self, domain: &str) -> Option<Status> {
        self.sites.get(domain).copied().flatten()
    }
}

impl SiteDocument for MemoryPage {
    type Site = String;

    fn find_site(&self, domain: &str) -> Result<Option<String>, FeedError> {
        Ok(self.sites.contains_key(domain).then(|| domain.to_string()))
    }

    fn mark(&mut self, site: &String, status: Status) -> Result<(), FeedError> {
        self.sites.insert(site.clone(), Some(status));
        self.writes += 1;
        Ok(())
    }
}

/// What went out over the socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Close(Option<(u16, String)>),
}

/// Records outbound frames. Sends fail once a close has gone out, like a
/// browser socket past OPEN.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub frames: RefCell<Vec<Frame>>,
}

impl RecordingTransport {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    fn closed(&self) -> bool {
        self.frames
            .borrow()
            .iter()
            .any(|f| matches!(f, Frame::Close(_)))
    }
}

impl FeedTransport for RecordingTransport {
    fn send_text(&self, text: &str) -> Result<(), FeedError> {
        if self.closed() {
            return Err(FeedError::Transport("socket is not open".into()));
        }
        self.frames.borrow_mut().push(Frame::Text(text.to_string()));
        Ok(())
    }

    fn close(&self) -> Result<(), FeedError> {
        self.frames.borrow_mut().push(Frame::Close(None));
        Ok(())
    }

    fn close_with(&self, code: u16, reason: &str) -> Result<(), FeedError> {
        self.frames
            .borrow_mut()
            .push(Frame::Close(Some((code, reason.to_string()))));
        Ok(())
    }
}
