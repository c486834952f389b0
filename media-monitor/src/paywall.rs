use crate::types::{PaywallService, Result};
use url::Url;

const ARCHIVE_TODAY: &str = "archive.ph";
const WAYBACK_SAVE_PREFIX: &str = "https://web.archive.org/save";

/// Request shape used against one configured bypass service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaywallStrategy {
    /// POST the URL to `{base}/submit/` and follow the redirect to the archived copy.
    ArchiveSubmit { submit_url: String, base_url: String },
    /// Fetch the Wayback Machine copy of the URL.
    WaybackSnapshot,
    /// Fetch `{base}/{url}`.
    Prefix { base_url: String },
}

impl PaywallStrategy {
    pub fn for_service(service: &PaywallService) -> Self {
        let base_url = service.base_url.trim_end_matches('/').to_string();

        let host = Url::parse(&base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()));

        if host.as_deref() == Some(ARCHIVE_TODAY) {
            Self::ArchiveSubmit {
                submit_url: format!("{}/submit/", base_url),
                base_url,
            }
        } else if base_url == WAYBACK_SAVE_PREFIX {
            Self::WaybackSnapshot
        } else {
            Self::Prefix { base_url }
        }
    }

    /// URL to GET for the strategies that need no handshake.
    pub fn direct_url(&self, original_url: &str) -> Option<String> {
        match self {
            Self::ArchiveSubmit { .. } => None,
            Self::WaybackSnapshot => Some(wayback_url(original_url)),
            Self::Prefix { base_url } => Some(format!("{}/{}", base_url, original_url)),
        }
    }
}

pub fn wayback_url(original_url: &str) -> String {
    format!("https://web.archive.org/web/{}", original_url)
}

/// Resolve a redirect target against the service it came from.
pub fn resolve_location(base_url: &str, location: &str) -> Result<String> {
    let base = Url::parse(base_url)?;
    Ok(base.join(location)?.to_string())
}

/// Services in the order they should be tried: ascending priority, config order on ties.
pub fn ordered_services(services: &[PaywallService]) -> Vec<&PaywallService> {
    let mut ordered: Vec<&PaywallService> = services.iter().collect();
    ordered.sort_by_key(|s| s.priority);
    ordered
}
