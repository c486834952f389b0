use crate::types::Result;
use async_trait::async_trait;

/// Minimal response shape the fetch pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// `Location` header, if any
    pub location: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302)
    }
}

/// Trait for the network underneath content fetching (feeds, article pages, archive mirrors).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET a URL, following redirects.
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    /// POST a urlencoded form without following redirects, so the caller can
    /// read the `Location` header.
    async fn post_form_no_redirect(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse>;
}
