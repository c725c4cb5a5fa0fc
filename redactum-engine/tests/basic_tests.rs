//! Basic tests for redactum-engine

use redactum_engine::*;

use async_trait::async_trait;
use redactum_core::builtin_matchers;
use std::sync::Arc;

fn local_scheduler(config: EngineConfig) -> Scheduler {
    Scheduler::new(RedactionEngine::with_matchers(builtin_matchers()), config).unwrap()
}

#[test]
fn test_engine_config_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.chunk_size, 5000);
    assert!(config.parallel);
    assert_eq!(config.max_workers, None);
    assert_eq!(config.async_threshold, 1000);
}

#[test]
fn test_execution_mode_selection() {
    use redactum_engine::executor::select_mode;

    assert_eq!(select_mode(500, 5000, 1000), ExecutionMode::Inline);
    assert_eq!(select_mode(1000, 5000, 1000), ExecutionMode::Offloaded);
    assert_eq!(select_mode(5001, 5000, 1000), ExecutionMode::Chunked);
    assert_eq!(select_mode(3, 5000, 0), ExecutionMode::Offloaded);
}

#[test]
fn test_chunker_covers_entire_text() {
    let chunker = Chunker::new(10);
    let text = "Hello world. This is a test.";
    let segments = chunker.chunk_text(text);

    assert!(segments.len() > 1);

    let mut total_len = 0;
    for segment in &segments {
        total_len += segment.text.len();
    }
    assert_eq!(total_len, text.len());
}

#[test]
fn test_chunk_boundary_splits_at_spaces() {
    // Length 2 * chunk_size + 5 exactly
    let chunk_size = 40;
    let text = "word ".repeat(17);
    assert_eq!(text.chars().count(), 2 * chunk_size + 5);

    let segments = Chunker::new(chunk_size).chunk_text(&text);
    assert_eq!(segments.len(), 3);
    for segment in &segments {
        assert!(segment.text.chars().count() <= chunk_size);
        assert!(segment.text.ends_with(' '));
    }

    let merged: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(merged, text);
}

#[test]
fn test_spaceless_text_splits_at_hard_limit() {
    let text = "a".repeat(85);
    let segments = Chunker::new(40).chunk_text(&text);

    let lengths: Vec<usize> = segments.iter().map(|s| s.text.len()).collect();
    assert_eq!(lengths, vec![40, 40, 5]);

    let merged: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(merged, text);
}

#[test]
fn test_pipeline_round_trip_with_store() {
    let scheduler = local_scheduler(EngineConfig::default());
    let store = TokenStore::new();
    let text = "Email: john@example.com, Phone: (555) 123-4567, SSN: 123-45-6789";

    let output = scheduler.redact(text).unwrap();
    assert_eq!(output.tokens.len(), 3);
    store.extend(output.tokens.clone());

    assert_eq!(store.unmask(&output.text), text);
}

#[test]
fn test_unmask_inverse_without_store() {
    let scheduler = local_scheduler(EngineConfig {
        chunk_size: 30,
        ..EngineConfig::default()
    });
    let text = "ssn 123-45-6789 and a long tail of ordinary words to force chunking here";

    let output = scheduler.redact(text).unwrap();
    assert_eq!(output.mode, ExecutionMode::Chunked);
    assert_eq!(unmask_with(&output.text, &output.tokens), text);
}

#[test]
fn test_batch_round_trip() {
    let scheduler = local_scheduler(EngineConfig::default());
    let store = TokenStore::new();
    let texts = vec![
        "alpha card 4532-0151-1283-0366".to_string(),
        "beta nothing here".to_string(),
        "gamma ip 10.0.0.1".to_string(),
    ];

    let results = scheduler.batch(&texts);
    for (text, result) in texts.iter().zip(&results) {
        let output = result.as_ref().unwrap();
        store.extend(output.tokens.clone());
        assert_eq!(&store.unmask(&output.text), text);
    }
}

struct PhoneDetector;

#[async_trait]
impl Detector for PhoneDetector {
    async fn detect(&self, text: &str) -> std::result::Result<Vec<DetectedEntity>, DetectorError> {
        Ok(text
            .match_indices("(555) 123-4567")
            .map(|(at, found)| DetectedEntity {
                text: found.to_string(),
                category: "PhoneNumber".to_string(),
                begin_offset: at,
                end_offset: at + found.len(),
                confidence: 0.97,
            })
            .collect())
    }
}

#[tokio::test]
async fn test_detector_end_to_end() {
    let scheduler = Scheduler::new(
        RedactionEngine::with_detector(Arc::new(PhoneDetector)),
        EngineConfig::default(),
    )
    .unwrap();
    let store = TokenStore::new();
    let text = "call me on (555) 123-4567 tomorrow";

    let output = scheduler.redact_async(text).await.unwrap();
    assert_eq!(output.tokens.len(), 1);

    // Tag comes from the reported label, category maps onto the taxonomy
    let token = &output.tokens[0];
    assert!(token.id.starts_with("[PHONENUMBER_"));
    assert_eq!(token.category, PiiCategory::Phone);
    assert_eq!(&text[token.start..token.end], "(555) 123-4567");

    store.extend(output.tokens.clone());
    assert_eq!(store.unmask(&output.text), text);
}

struct DownDetector;

#[async_trait]
impl Detector for DownDetector {
    async fn detect(&self, _text: &str) -> std::result::Result<Vec<DetectedEntity>, DetectorError> {
        Err(DetectorError::Unavailable("dns failure".to_string()))
    }
}

#[tokio::test]
async fn test_detector_outage_is_disclosed_not_fatal() {
    let scheduler = Scheduler::new(
        RedactionEngine::with_detector(Arc::new(DownDetector)),
        EngineConfig::default(),
    )
    .unwrap();

    let output = scheduler.redact_async("secret payload").await.unwrap();
    assert_eq!(output.text, "secret payload");
    assert!(output.tokens.is_empty());
    assert_eq!(output.detector_failures, 1);
}

#[tokio::test]
async fn test_mode_reporting() {
    let scheduler = local_scheduler(EngineConfig {
        chunk_size: 50,
        async_threshold: 30,
        ..EngineConfig::default()
    });

    let small = scheduler.redact_async("tiny").await.unwrap();
    assert_eq!(small.mode, ExecutionMode::Inline);
    assert_eq!(small.chunks, None);

    let medium = scheduler
        .redact_async("exactly long enough to cross the offload line")
        .await
        .unwrap();
    assert_eq!(medium.mode, ExecutionMode::Offloaded);

    let large_text = "plenty of words repeated over and over again ".repeat(4);
    let large = scheduler.redact_async(&large_text).await.unwrap();
    assert_eq!(large.mode, ExecutionMode::Chunked);
    assert!(large.chunks.unwrap() > 1);
}
