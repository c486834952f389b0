mod common;

use common::{article, init_tracing, quoted};
use media_monitor::store::{decode_timestamp, encode_timestamp};
use media_monitor::{ArticleStore, StoreOutcome};

#[tokio::test]
async fn test_duplicate_urls_are_ignored() {
    init_tracing();

    let store = ArticleStore::in_memory().await.unwrap();
    let first = article("AI in het ziekenhuis", "https://nos.test/1", "NOS", 2, &["AI in de zorg"]);
    let mut second = first.clone();
    second.title = "Andere titel, zelfde URL".to_string();

    let outcome = store.store_many(&[first.clone(), second]).await;
    assert_eq!(
        outcome,
        StoreOutcome {
            inserted: 1,
            duplicates: 1,
            failed: 0
        }
    );
    assert_eq!(store.count_since(None).await.unwrap(), 1);

    // Storing the same article again is not an error
    assert!(!store.store(&first).await.unwrap());

    let stored = store.get_since(24, None).await.unwrap();
    assert_eq!(stored[0].title, "AI in het ziekenhuis");
}

#[tokio::test]
async fn test_articles_round_trip() {
    init_tracing();

    let store = ArticleStore::in_memory().await.unwrap();
    let mut original = article(
        "Minister wil regels voor algoritmes",
        "https://nrc.test/algoritmes",
        "NRC",
        5,
        &["AI-wetgeving", "AI-ethiek"],
    );
    original.summary = Some("Het kabinet komt met nieuwe wetgeving.".to_string());
    original.content = Some("Volledige tekst over de AI Act.".to_string());
    original.quoted_experts = vec![quoted("Anna Bakker", "Regels zijn nodig")];

    assert!(store.store(&original).await.unwrap());

    let stored = store.get_since(24, None).await.unwrap();
    assert_eq!(stored, vec![original]);
}

#[tokio::test]
async fn test_window_and_source_filters() {
    init_tracing();

    let store = ArticleStore::in_memory().await.unwrap();
    store
        .store_many(&[
            article("Nieuw", "https://a.test/1", "NOS", 1, &[]),
            article("Gisteren", "https://a.test/2", "NRC", 20, &[]),
            article("Vorige week", "https://a.test/3", "NOS", 24 * 8, &[]),
        ])
        .await;

    let recent = store.get_since(24, None).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Nieuw", "Gisteren"]);

    let nos_only = store.get_since(24 * 30, Some(&["NOS".to_string()][..])).await.unwrap();
    let titles: Vec<&str> = nos_only.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Nieuw", "Vorige week"]);

    assert_eq!(store.count_since(Some(24)).await.unwrap(), 2);

    let per_source = store.source_stats_since(24).await.unwrap();
    assert_eq!(per_source.get("NOS"), Some(&1));
    assert_eq!(per_source.get("NRC"), Some(&1));
}

#[tokio::test]
async fn test_cleanup_removes_old_articles() {
    init_tracing();

    let store = ArticleStore::in_memory().await.unwrap();
    store
        .store_many(&[
            article("Recent", "https://a.test/recent", "NOS", 2, &[]),
            article("Oud", "https://a.test/old", "NOS", 24 * 100, &[]),
        ])
        .await;

    assert_eq!(store.delete_older_than(90).await.unwrap(), 1);
    assert_eq!(store.count_since(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_info() {
    init_tracing();

    let store = ArticleStore::in_memory().await.unwrap();

    let empty = store.info().await.unwrap();
    assert_eq!(empty.total_count, 0);
    assert_eq!(empty.date_range.earliest, None);

    let newest = article("Nieuw", "https://a.test/1", "NOS", 1, &[]);
    let oldest = article("Oud", "https://a.test/2", "Tweakers", 48, &[]);
    store.store_many(&[newest.clone(), oldest.clone()]).await;

    let info = store.info().await.unwrap();
    assert_eq!(info.total_count, 2);
    assert_eq!(info.date_range.earliest, Some(oldest.published_at));
    assert_eq!(info.date_range.latest, Some(newest.published_at));
    assert_eq!(info.per_source_counts.get("Tweakers"), Some(&1));
}

#[test]
fn test_timestamps_sort_as_text() {
    let earlier = decode_timestamp("2024-03-01T09:00:00.000000000Z").unwrap();
    let later = decode_timestamp("2024-11-20T17:30:00.500000000Z").unwrap();

    assert!(encode_timestamp(&earlier) < encode_timestamp(&later));
    assert_eq!(decode_timestamp(&encode_timestamp(&later)).unwrap(), later);
}
