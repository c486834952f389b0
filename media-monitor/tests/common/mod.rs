#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use media_monitor::{Article, HttpResponse, HttpTransport, MonitorError, QuotedExpert, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, Once};
use tokio::time::Instant;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Fail,
}

/// Scripted transport. Each URL answers from its queue; the last reply repeats.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, replies: Vec<Reply>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into_iter().collect());
        self
    }

    pub fn ok(self, url: &str, body: &str) -> Self {
        self.route(url, vec![Reply::Respond(HttpResponse::ok(body))])
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.route(
            url,
            vec![Reply::Respond(HttpResponse {
                status,
                location: None,
                body: String::new(),
            })],
        )
    }

    pub fn redirect(self, url: &str, location: &str) -> Self {
        self.route(
            url,
            vec![Reply::Respond(HttpResponse {
                status: 302,
                location: Some(location.to_string()),
                body: String::new(),
            })],
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn call_times(&self, url: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, at)| *at)
            .collect()
    }

    fn answer(&self, url: &str) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push((url.to_string(), Instant::now()));

        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail) => Err(MonitorError::General(format!("connection refused: {}", url))),
            None => Ok(HttpResponse {
                status: 404,
                location: None,
                body: String::new(),
            }),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.answer(url)
    }

    async fn post_form_no_redirect(&self, url: &str, _form: &[(&str, &str)]) -> Result<HttpResponse> {
        self.answer(url)
    }
}

/// An article body long enough not to look like a paywall teaser.
pub fn long_body(text: &str) -> String {
    let mut body = format!("<html><body><h1>Artikel</h1><p>{}</p>", text);
    while body.len() < 1500 {
        body.push_str("<p>Meer achtergrond bij dit verhaal volgt in de komende weken.</p>");
    }
    body.push_str("</body></html>");
    body
}

pub struct FeedItem<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
    pub hours_ago: i64,
}

pub fn rss_feed(items: &[FeedItem]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Testkrant</title><link>https://krant.test</link><description>Test</description>"#,
    );
    for item in items {
        let published = (Utc::now() - Duration::hours(item.hours_ago)).to_rfc2822();
        xml.push_str(&format!(
            "<item><title>{}</title><link>{}</link><description>{}</description><pubDate>{}</pubDate></item>",
            item.title, item.link, item.description, published
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

pub fn article(title: &str, url: &str, source: &str, hours_ago: i64, topics: &[&str]) -> Article {
    Article {
        title: title.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        published_at: Utc::now() - Duration::hours(hours_ago),
        content: None,
        summary: None,
        mentions_ai: true,
        ai_topics: topics.iter().map(|t| t.to_string()).collect(),
        quoted_experts: Vec::new(),
    }
}

pub fn quoted(name: &str, quote: &str) -> QuotedExpert {
    QuotedExpert {
        name: name.to_string(),
        quote: quote.to_string(),
    }
}
