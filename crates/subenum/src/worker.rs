use crate::error::SourceError;
use crate::extract::{Extractor, SubdomainSet};
use crate::model::{ScanEvent, SourceFailure};
use crate::sources::Source;
use crate::Result;
use reqwest::{Client, Response};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument};

/// Query every source for `domain`, one after the other, then emit the unique matches.
///
/// A failing source is reported on `events` and skipped. Returns the number of
/// subdomains emitted.
#[instrument(name = "worker", level = "info", fields(domain = %domain), skip_all)]
pub async fn enumerate_domain(
    http_client: &Client,
    sources: &[Source],
    domain: &str,
    events: &UnboundedSender<ScanEvent>,
) -> Result<usize> {
    let extractor = Extractor::new(domain)?;
    let mut subdomains = SubdomainSet::new();

    for source in sources {
        let url = source.query_url(domain);
        let before = subdomains.len();

        match query_source(http_client, &extractor, source, &url, &mut subdomains).await {
            Ok(()) => debug!(
                "{}: {} new",
                source.name(),
                subdomains.len().saturating_sub(before)
            ),
            Err(error) => {
                let failure = ScanEvent::SourceFailed(SourceFailure {
                    domain: domain.to_string(),
                    source: source.name(),
                    url,
                    error,
                });
                if let Err(unsent) = events.send(failure) {
                    debug!("Aggregator gone, failure dropped: {:?}", unsent.0);
                }
            }
        }
    }

    let count = subdomains.len();
    info!("{} collected", count);

    for subdomain in subdomains {
        if let Err(unsent) = events.send(ScanEvent::Subdomain(subdomain)) {
            debug!("Aggregator gone, {:?} dropped", unsent.0);
        }
    }

    Ok(count)
}

async fn query_source(
    http_client: &Client,
    extractor: &Extractor,
    source: &Source,
    url: &str,
    subdomains: &mut SubdomainSet,
) -> core::result::Result<(), SourceError> {
    let res = http_request(http_client, url)
        .await
        .map_err(SourceError::Network)?;
    let body = res.bytes().await.map_err(SourceError::Read)?;

    extractor.extract(source.kind(), &body, subdomains)
}

// region:        --- HTTP requests

/// Any status is accepted, the body is searched regardless.
#[instrument(name = "HTTP_request", level = "debug", skip_all, fields(url = url))]
pub async fn http_request(http_client: &Client, url: &str) -> reqwest::Result<Response> {
    debug!("Sending request");
    let res = http_client.get(url).send().await?;
    debug!("Receive with status: {}", res.status());
    Ok(res)
}

// endregion:     --- HTTP requests
