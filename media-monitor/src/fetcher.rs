use crate::paywall::{ordered_services, resolve_location, PaywallStrategy};
use crate::traits::{HttpResponse, HttpTransport};
use crate::types::{FetchConfig, PaywallService, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bodies shorter than this are assumed to be a paywall teaser.
pub const MIN_ARTICLE_CHARS: usize = 1000;

const PAYWALL_MARKERS: [&str; 2] = ["paywall", "subscriber"];

/// `HttpTransport` backed by reqwest.
pub struct ReqwestTransport {
    client: Client,
    no_redirect_client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        let no_redirect_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect_client,
        })
    }

    async fn into_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        Self::into_response(response).await
    }

    async fn post_form_no_redirect(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        let response = self.no_redirect_client.post(url).form(form).send().await?;
        Self::into_response(response).await
    }
}

/// Retrying fetcher with a paywall-bypass fallback chain.
pub struct ContentFetcher {
    transport: Arc<dyn HttpTransport>,
    config: FetchConfig,
    paywall_services: Vec<PaywallService>,
}

impl ContentFetcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: FetchConfig,
        paywall_services: Vec<PaywallService>,
    ) -> Self {
        Self {
            transport,
            config,
            paywall_services,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn backoff(&self) -> ExponentialBackoff {
        let base = Duration::from_secs(self.config.retry_delay_seconds);
        ExponentialBackoff {
            current_interval: base,
            initial_interval: base,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: base * 32,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// GET `url` up to `max_retries` times, sleeping 1, 2, 4, ... retry units
    /// between attempts. Never fails: exhausted retries yield `None`.
    pub async fn fetch_with_retry(&self, url: &str, max_retries: u32) -> Option<String> {
        let mut backoff = self.backoff();

        for attempt in 1..=max_retries {
            match self.transport.get(url).await {
                Ok(response) if response.is_ok() => {
                    debug!("Fetched {} ({} bytes) on attempt {}", url, response.body.len(), attempt);
                    return Some(response.body);
                }
                Ok(response) => {
                    warn!("Attempt {} for {} returned HTTP {}", attempt, url, response.status);
                }
                Err(e) => {
                    warn!("Attempt {} for {} failed: {}", attempt, url, e);
                }
            }

            if attempt < max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    debug!("Retrying {} in {:?}", url, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        error!("Failed to fetch {} after {} attempts", url, max_retries);
        None
    }

    /// Try each configured bypass service in priority order; first non-empty body wins.
    pub async fn bypass_paywall(&self, url: &str) -> Option<String> {
        for service in ordered_services(&self.paywall_services) {
            let strategy = PaywallStrategy::for_service(service);

            let body = match &strategy {
                PaywallStrategy::ArchiveSubmit { submit_url, base_url } => {
                    match self.submit_to_archive(submit_url, base_url, url).await {
                        Ok(body) => body,
                        Err(e) => {
                            warn!("Paywall bypass via {} failed: {}", service.base_url, e);
                            None
                        }
                    }
                }
                other => match other.direct_url(url) {
                    Some(mirror_url) => self.fetch_with_retry(&mirror_url, self.config.max_retries).await,
                    None => None,
                },
            };

            match body {
                Some(body) if !body.is_empty() => {
                    info!("Bypassed paywall for {} via {}", url, service.base_url);
                    return Some(body);
                }
                _ => debug!("No content from {} for {}", service.base_url, url),
            }
        }

        warn!("All paywall bypass services failed for {}", url);
        None
    }

    async fn submit_to_archive(&self, submit_url: &str, base_url: &str, url: &str) -> Result<Option<String>> {
        let response = self
            .transport
            .post_form_no_redirect(submit_url, &[("url", url)])
            .await?;

        if !response.is_redirect() {
            debug!("Archive submission for {} returned HTTP {}", url, response.status);
            return Ok(None);
        }

        let Some(location) = response.location else {
            return Ok(None);
        };

        let archive_url = resolve_location(base_url, &location)?;
        Ok(self.fetch_with_retry(&archive_url, self.config.max_retries).await)
    }

    /// Direct fetch, falling back to the bypass chain when the body looks paywalled.
    /// A failed bypass keeps whatever the direct fetch returned.
    pub async fn fetch_article_content(&self, url: &str) -> Option<String> {
        let direct = self.fetch_with_retry(url, self.config.max_retries).await;

        if looks_paywalled(direct.as_deref()) {
            debug!("Content for {} looks paywalled, trying bypass services", url);
            if let Some(bypassed) = self.bypass_paywall(url).await {
                return Some(bypassed);
            }
        }

        direct
    }
}

pub fn looks_paywalled(body: Option<&str>) -> bool {
    match body {
        None => true,
        Some(body) => {
            let lower = body.to_lowercase();
            body.is_empty()
                || PAYWALL_MARKERS.iter().any(|marker| lower.contains(marker))
                || body.chars().count() < MIN_ARTICLE_CHARS
        }
    }
}
