mod common;

use media_monitor::{KeywordExtractor, MonitorConfig, QuotedExpert, SignalExtractor};

fn extractor() -> KeywordExtractor {
    KeywordExtractor::from_config(&MonitorConfig::default()).unwrap()
}

#[test]
fn test_ai_relevance_uses_word_boundaries() {
    let extractor = extractor();

    assert!(extractor.is_ai_related("Kunstmatige intelligentie verandert de zorg"));
    assert!(extractor.is_ai_related("Nieuwe versie van ChatGPT gelanceerd"));
    assert!(extractor.is_ai_related("Kabinet wil toezicht op AI versterken"));
    assert!(extractor.is_ai_related("Het algoritme van de Belastingdienst"));

    assert!(!extractor.is_ai_related("Tips voor een slankere waistline"));
    assert!(!extractor.is_ai_related("Ajax wint van PSV in de Klassieker"));
    assert!(!extractor.is_ai_related("Thailand verwelkomt meer toeristen"));
}

#[test]
fn test_topics_follow_table_order() {
    let extractor = extractor();

    let topics = extractor.extract_topics("AI helpt artsen in het ziekenhuis, maar de privacy van patiënten staat onder druk");
    assert_eq!(topics, vec!["AI in de zorg".to_string(), "AI en privacy".to_string()]);

    assert!(extractor.extract_topics("Een verhaal zonder trefwoorden").is_empty());
}

#[test]
fn test_topic_keywords_match_case_insensitively() {
    let extractor = extractor();

    assert_eq!(
        extractor.extract_topics("De AVG geldt ook voor algoritmes"),
        vec!["AI en privacy".to_string()]
    );
    assert!(extractor
        .extract_topics("Bedrijven experimenteren met gpt-modellen")
        .contains(&"Generative AI".to_string()));
}

#[test]
fn test_quote_after_speech_verb() {
    let quotes = extractor().extract_quotes(r#""AI verandert alles", zegt Anna Bakker."#);

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].name, "Anna Bakker");
    assert_eq!(quotes[0].quote, "AI verandert alles");
}

#[test]
fn test_role_prefix_stays_in_name() {
    let quotes = extractor().extract_quotes(r#""AI is de toekomst", zegt CEO Anna Bakker."#);

    assert_eq!(quotes, vec![QuotedExpert {
        name: "CEO Anna Bakker".to_string(),
        quote: "AI is de toekomst".to_string(),
    }]);
}

#[test]
fn test_quote_attributed_to_a_report_is_dropped() {
    assert!(extractor()
        .extract_quotes(r#""Het probleem is complex", zegt het rapport."#)
        .is_empty());
}

#[test]
fn test_quote_before_speech_verb() {
    let quotes = extractor().extract_quotes(r#"Pieter Jansen zegt: "Dit is pas het begin""#);

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].name, "Pieter Jansen");
    assert_eq!(quotes[0].quote, "Dit is pas het begin");
}

#[test]
fn test_quote_introduced_by_volgens() {
    let quotes = extractor().extract_quotes(r#"Volgens Marieke Smit, "regels zijn hard nodig""#);

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].name, "Marieke Smit");
    assert_eq!(quotes[0].quote, "regels zijn hard nodig");
}

#[test]
fn test_implausible_names_are_discarded() {
    let extractor = extractor();

    assert!(extractor.extract_quotes(r#"De Minister zegt: "Het werkt""#).is_empty());
    assert!(extractor
        .extract_quotes(r#"Alpha Beta Gamma Delta Epsilon Zeta zegt: "Te lang""#)
        .is_empty());
}

#[test]
fn test_repeated_attributions_are_kept() {
    let text = r#""Eerste punt", zegt Anna Bakker. "Tweede punt", aldus Anna Bakker."#;
    let quotes = extractor().extract_quotes(text);

    assert_eq!(quotes.len(), 2);
    assert!(quotes.iter().all(|q| q.name == "Anna Bakker"));
}
