use status_common::render::{domain_selector, SiteDocument, STATUS_ATTRIBUTE};
use status_common::types::Status;
use status_common::FeedError;
use web_sys::{Document, Element};

/// The live page. Site elements come from the server-rendered markup.
#[derive(Clone, Debug)]
pub struct PageDocument {
    document: Document,
}

impl PageDocument {
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl SiteDocument for PageDocument {
    type Site = Element;

    fn find_site(&self, domain: &str) -> Result<Option<Element>, FeedError> {
        self.document
            .query_selector(&domain_selector(domain))
            .map_err(|e| FeedError::Document(format!("{:?}", e)))
    }

    fn mark(&mut self, site: &Element, status: Status) -> Result<(), FeedError> {
        site.set_attribute(STATUS_ATTRIBUTE, status.as_str())
            .map_err(|e| FeedError::Document(format!("{:?}", e)))
    }
}
