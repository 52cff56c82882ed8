use crate::model::{ScanEvent, ScanSummary};
use crate::sources::Source;
use crate::{worker, Result};
use futures::{stream, StreamExt};
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, error, info, instrument, trace, warn};

// region:        --- Constants

// timeouts
pub const HTTP_REQUEST_TIMEOUT_MS: u64 = 10000;

// concurrency numbers
pub const DOMAINS_ENUMERATION_CONCURRENCY: usize = 20;

// endregion:     --- Constants

// region:        --- Settings

#[derive(Debug, Clone)]
pub struct Settings {
    /// Maximum number of domains enumerated at the same time.
    pub concurrency: usize,
    /// Applied to each request, connection and body read included.
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DOMAINS_ENUMERATION_CONCURRENCY,
            http_timeout: Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

// endregion:     --- Settings

// region:        --- Scan main function

/// Enumerate every domain against every source and merge the results.
///
/// Source failures end up in the summary, they never fail the scan.
#[instrument(name = "scan", level = "info", skip_all)]
pub async fn scan(settings: &Settings, sources: Vec<Source>, domains: Vec<String>) -> Result<ScanSummary> {
    trace!("Start scan on {} domains", domains.len());

    // create http client
    let http_client = Client::builder()
        .timeout(settings.http_timeout)
        .user_agent(settings.user_agent.as_str())
        .build()?;
    debug!("HTTP Client created: {:?}", http_client);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let coordinator = tokio::spawn(fan_out(
        http_client,
        sources,
        domains,
        settings.concurrency,
        events_tx,
    ));

    let summary = aggregate(events_rx).await;
    coordinator.await?;

    info!(
        "{} subdomains found, {} source failures",
        summary.subdomains.len(),
        summary.failures.len()
    );
    Ok(summary)
}

// endregion:     --- Scan main function

// region:        --- Scan subfunctions

/// Owns the only original sender: the channel closes once every worker is done.
#[instrument(name = "fan_out", level = "info", skip_all)]
async fn fan_out(
    http_client: Client,
    sources: Vec<Source>,
    domains: Vec<String>,
    concurrency: usize,
    events: UnboundedSender<ScanEvent>,
) {
    info!("{} domains to enumerate", domains.len());

    stream::iter(domains.into_iter())
        .for_each_concurrent(concurrency.max(1), |domain| {
            let http_client = &http_client;
            let sources = sources.as_slice();
            let events = events.clone();
            async move {
                if let Err(err) =
                    worker::enumerate_domain(http_client, sources, &domain, &events).await
                {
                    error!("worker/{}: {}", domain, err);
                }
            }
        })
        .await;

    info!("All workers finished");
}

#[instrument(name = "aggregate", level = "info", skip_all)]
async fn aggregate(events: UnboundedReceiver<ScanEvent>) -> ScanSummary {
    let mut subdomains = BTreeSet::new();
    let mut failures = Vec::new();

    let mut events = UnboundedReceiverStream::new(events);
    while let Some(event) = events.next().await {
        match event {
            ScanEvent::Subdomain(subdomain) => {
                subdomains.insert(subdomain);
            }
            ScanEvent::SourceFailed(failure) => {
                warn!(
                    "{} for {}: {} ({})",
                    failure.source, failure.domain, failure.error, failure.url
                );
                failures.push(failure);
            }
        }
    }

    ScanSummary {
        subdomains: subdomains.into_iter().collect(),
        failures,
    }
}

// endregion:     --- Scan subfunctions
