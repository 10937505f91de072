use crate::types::{SiteStatusRecord, Status};
use crate::FeedError;

/// Attribute that names the site an element stands for.
pub const DOMAIN_ATTRIBUTE: &str = "data-domain";

/// Attribute the client writes the status marker into.
pub const STATUS_ATTRIBUTE: &str = "data-status";

/// The page (or anything standing in for it) holding one element per site.
///
/// The client only ever looks elements up and writes their marker; it never
/// creates or removes them.
pub trait SiteDocument {
    type Site;

    fn find_site(&self, domain: &str) -> Result<Option<Self::Site>, FeedError>;

    fn mark(&mut self, site: &Self::Site, status: Status) -> Result<(), FeedError>;
}

/// What happened to one status record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageOutcome {
    Updated { domain: String, status: Status },
    /// No element carries this domain.
    Unmatched { domain: String },
    /// The connection was already closing.
    Ignored,
}

/// Write the record's marker onto its element, if the page has one.
pub fn apply_record<D: SiteDocument>(
    document: &mut D,
    record: &SiteStatusRecord,
) -> Result<MessageOutcome, FeedError> {
    let status = record.status();
    match document.find_site(&record.domain)? {
        Some(site) => {
            document.mark(&site, status)?;
            Ok(MessageOutcome::Updated {
                domain: record.domain.clone(),
                status,
            })
        }
        None => Ok(MessageOutcome::Unmatched {
            domain: record.domain.clone(),
        }),
    }
}

/// CSS selector for the element of `domain`: `[data-domain="<domain>"]`.
///
/// Quotes, backslashes and control characters in the domain are escaped so
/// the value can never terminate the attribute string early.
pub fn domain_selector(domain: &str) -> String {
    let mut escaped = String::with_capacity(domain.len() + 2);
    for c in domain.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            // CSS hex escape, the trailing space terminates it
            c if c.is_control() => {
                escaped.push_str(&format!("\\{:x} ", c as u32));
            }
            c => escaped.push(c),
        }
    }
    format!("[{}=\"{}\"]", DOMAIN_ATTRIBUTE, escaped)
}
