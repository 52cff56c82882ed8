mod structured;
mod unstructured;

use crate::error::SourceError;
use crate::sources::SourceKind;
use crate::Result;
use regex::bytes::Regex;
use std::collections::HashSet;

/// Candidate names found for one domain, unique and unordered.
pub type SubdomainSet = HashSet<String>;

/// Both extraction strategies bound to a single target domain.
pub struct Extractor {
    domain: String,
    pattern: Regex,
}

impl Extractor {
    pub fn new(domain: &str) -> Result<Self> {
        Ok(Self {
            domain: domain.to_string(),
            pattern: unstructured::pattern(domain)?,
        })
    }

    /// Insert every match found in `body` into `subdomains`.
    ///
    /// Matches are kept verbatim: no case folding, no trimming.
    pub fn extract(
        &self,
        kind: SourceKind,
        body: &[u8],
        subdomains: &mut SubdomainSet,
    ) -> core::result::Result<(), SourceError> {
        match kind {
            SourceKind::Structured => structured::extract(body, &self.domain, subdomains),
            SourceKind::Unstructured => {
                unstructured::extract(&self.pattern, body, subdomains);
                Ok(())
            }
        }
    }
}
