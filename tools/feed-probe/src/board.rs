use std::collections::BTreeMap;

use status_common::render::SiteDocument;
use status_common::types::Status;
use status_common::FeedError;

/// Terminal stand-in for the status page: one row per site.
#[derive(Debug, Default)]
pub struct SiteBoard {
    rows: BTreeMap<String, Option<Status>>,
    /// Accept any domain when no site list was given.
    open: bool,
}

impl SiteBoard {
    pub fn new(sites: &[String]) -> Self {
        Self {
            rows: sites.iter().map(|s| (s.clone(), None)).collect(),
            open: sites.is_empty(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, Option<Status>)> {
        self.rows.iter().map(|(d, s)| (d.as_str(), *s))
    }
}

impl SiteDocument for SiteBoard {
    type Site = String;

    fn find_site(&self, domain: &str) -> Result<Option<String>, FeedError> {
        if self.open || self.rows.contains_key(domain) {
            Ok(Some(domain.to_string()))
        } else {
            Ok(None)
        }
    }

    fn mark(&mut self, site: &String, status: Status) -> Result<(), FeedError> {
        self.rows.insert(site.clone(), Some(status));
        Ok(())
    }
}
