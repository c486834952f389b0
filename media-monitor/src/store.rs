use crate::types::{Article, DateRange, MonitorError, QuotedExpert, Result, StoreInfo, StoreOutcome};
use crate::utils::time::{days_ago, hours_ago};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, error, info};

/// SQLite-backed article archive keyed by URL.
///
/// Timestamps are stored as fixed-width RFC 3339 text (nanosecond precision,
/// `Z` suffix) so string comparison in SQL orders them chronologically.
pub struct ArticleStore {
    db: SqlitePool,
}

impl ArticleStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if let Some(dir) = options.clone().get_filename().parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let db = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { db };
        store.setup_schema().await?;
        Ok(store)
    }

    /// A private in-memory database, gone when the store is dropped.
    pub async fn in_memory() -> Result<Self> {
        // One connection that never expires: each in-memory connection is its own database
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { db };
        store.setup_schema().await?;
        Ok(store)
    }

    pub async fn setup_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT UNIQUE NOT NULL,
                title TEXT NOT NULL,
                source TEXT NOT NULL,
                date_published TEXT NOT NULL,
                date_stored TEXT NOT NULL,
                content TEXT,
                summary TEXT,
                ai_topics TEXT NOT NULL,
                quoted_experts TEXT NOT NULL,
                mentions_ai BOOLEAN NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_date_published ON articles (date_published)")
            .execute(&self.db)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_source ON articles (source)")
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Insert one article. Returns `false` when the URL is already stored.
    pub async fn store(&self, article: &Article) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (url, title, source, date_published, date_stored, content, summary,
                                  ai_topics, quoted_experts, mentions_ai)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT (url) DO NOTHING
            "#,
        )
        .bind(&article.url)
        .bind(&article.title)
        .bind(&article.source)
        .bind(encode_timestamp(&article.published_at))
        .bind(encode_timestamp(&Utc::now()))
        .bind(&article.content)
        .bind(&article.summary)
        .bind(serde_json::to_string(&article.ai_topics)?)
        .bind(serde_json::to_string(&article.quoted_experts)?)
        .bind(article.mentions_ai)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a batch. A failing article is logged and counted, never fatal.
    pub async fn store_many(&self, articles: &[Article]) -> StoreOutcome {
        let mut outcome = StoreOutcome::default();

        for article in articles {
            match self.store(article).await {
                Ok(true) => outcome.inserted += 1,
                Ok(false) => {
                    debug!("Article already stored: {}", article.url);
                    outcome.duplicates += 1;
                }
                Err(e) => {
                    error!("Failed to store article {}: {}", article.url, e);
                    outcome.failed += 1;
                }
            }
        }

        info!(
            "Stored {} new articles ({} duplicates, {} failed) out of {}",
            outcome.inserted,
            outcome.duplicates,
            outcome.failed,
            articles.len()
        );
        outcome
    }

    /// Articles published in the last `hours_back` hours, newest first,
    /// optionally restricted to the given source names.
    pub async fn get_since(&self, hours_back: u32, sources: Option<&[String]>) -> Result<Vec<Article>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT url, title, source, date_published, content, summary, ai_topics, quoted_experts, mentions_ai \
             FROM articles WHERE date_published >= ",
        );
        query.push_bind(encode_timestamp(&hours_ago(hours_back)));

        if let Some(sources) = sources.filter(|s| !s.is_empty()) {
            query.push(" AND source IN (");
            let mut separated = query.separated(", ");
            for source in sources {
                separated.push_bind(source.as_str());
            }
            separated.push_unseparated(")");
        }

        query.push(" ORDER BY date_published DESC");

        let rows = query.build().fetch_all(&self.db).await?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            match row_to_article(&row) {
                Ok(article) => articles.push(article),
                Err(e) => error!("Skipping unreadable article row: {}", e),
            }
        }

        Ok(articles)
    }

    /// Number of stored articles, optionally only those published in the last `hours_back` hours.
    pub async fn count_since(&self, hours_back: Option<u32>) -> Result<i64> {
        let count: i64 = match hours_back {
            Some(hours) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE date_published >= ?1")
                    .bind(encode_timestamp(&hours_ago(hours)))
                    .fetch_one(&self.db)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM articles")
                    .fetch_one(&self.db)
                    .await?
            }
        };

        Ok(count)
    }

    pub async fn source_stats_since(&self, hours_back: u32) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT source, COUNT(*) AS count FROM articles WHERE date_published >= ?1 GROUP BY source",
        )
        .bind(encode_timestamp(&hours_ago(hours_back)))
        .fetch_all(&self.db)
        .await?;

        source_counts(rows)
    }

    /// Retention cleanup by publish date. Returns the number of deleted rows.
    pub async fn delete_older_than(&self, days: u32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM articles WHERE date_published < ?1")
            .bind(encode_timestamp(&days_ago(days)))
            .execute(&self.db)
            .await?;

        info!("Deleted {} articles older than {} days", result.rows_affected(), days);
        Ok(result.rows_affected())
    }

    pub async fn info(&self) -> Result<StoreInfo> {
        let total_count = self.count_since(None).await?;

        let range = sqlx::query("SELECT MIN(date_published) AS earliest, MAX(date_published) AS latest FROM articles")
            .fetch_one(&self.db)
            .await?;

        let earliest: Option<String> = range.try_get("earliest")?;
        let latest: Option<String> = range.try_get("latest")?;

        let rows = sqlx::query("SELECT source, COUNT(*) AS count FROM articles GROUP BY source")
            .fetch_all(&self.db)
            .await?;

        Ok(StoreInfo {
            total_count,
            date_range: DateRange {
                earliest: earliest.as_deref().map(decode_timestamp).transpose()?,
                latest: latest.as_deref().map(decode_timestamp).transpose()?,
            },
            per_source_counts: source_counts(rows)?,
        })
    }
}

fn source_counts(rows: Vec<SqliteRow>) -> Result<HashMap<String, i64>> {
    let mut counts = HashMap::new();
    for row in rows {
        counts.insert(row.try_get("source")?, row.try_get("count")?);
    }
    Ok(counts)
}

fn row_to_article(row: &SqliteRow) -> Result<Article> {
    let ai_topics: String = row.try_get("ai_topics")?;
    let quoted_experts: String = row.try_get("quoted_experts")?;
    let published: String = row.try_get("date_published")?;

    Ok(Article {
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        source: row.try_get("source")?,
        published_at: decode_timestamp(&published)?,
        content: row.try_get("content")?,
        summary: row.try_get("summary")?,
        mentions_ai: row.try_get("mentions_ai")?,
        ai_topics: serde_json::from_str::<Vec<String>>(&ai_topics)?,
        quoted_experts: serde_json::from_str::<Vec<QuotedExpert>>(&quoted_experts)?,
    })
}

pub fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| MonitorError::Parse(format!("Invalid timestamp {:?}: {}", raw, e)))
}
