//! Call scheduling across execution regimes
//!
//! Picks the regime for each redact call (inline, offloaded, chunked),
//! drives the executors, and re-merges per-segment outputs. Batch calls
//! fan out one unit per input text; results land at their input index,
//! and a failed unit becomes that index's error value while siblings
//! complete.

use crate::chunker::{merge_results, Chunker, Segment};
use crate::config::EngineConfig;
use crate::engine::{RedactionEngine, SegmentOutput};
use crate::error::{EngineError, Result};
use crate::executor::{select_mode, ExecutionMode, Executor, SequentialExecutor, TaskKind};
use redactum_core::RedactionToken;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one scheduled redact call.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// The redacted text
    pub text: String,
    /// Tokens for every replaced span, ascending by start offset
    pub tokens: Vec<RedactionToken>,
    /// Regime the call actually ran under
    pub mode: ExecutionMode,
    /// Segment count when the call was chunked
    pub chunks: Option<usize>,
    /// Detector calls that failed and degraded to passthrough
    pub detector_failures: usize,
}

/// Schedules redact calls over the configured executors.
#[derive(Clone)]
pub struct Scheduler {
    engine: Arc<RedactionEngine>,
    chunker: Chunker,
    sequential_executor: SequentialExecutor,
    #[cfg(feature = "parallel")]
    parallel_executor: ParallelExecutor,
    config: EngineConfig,
}

impl Scheduler {
    /// Build a scheduler over a validated configuration.
    pub fn new(engine: RedactionEngine, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: Arc::new(engine),
            chunker: Chunker::new(config.chunk_size),
            sequential_executor: SequentialExecutor,
            #[cfg(feature = "parallel")]
            parallel_executor: ParallelExecutor::new(config.worker_count()),
            config,
        })
    }

    /// The pool flavor batch calls for this engine belong on.
    pub fn task_kind(&self) -> TaskKind {
        if self.engine.uses_detector() {
            TaskKind::IoBound
        } else {
            TaskKind::CpuBound
        }
    }

    /// Shared handle to the underlying engine.
    pub fn engine(&self) -> &Arc<RedactionEngine> {
        &self.engine
    }

    /// Redact one text synchronously with the local matchers.
    ///
    /// Detector-backed engines await network calls and must go through
    /// [`redact_async`](Self::redact_async) (or a caller-owned runtime).
    pub fn redact(&self, text: &str) -> Result<EngineOutput> {
        if self.engine.uses_detector() {
            return Err(EngineError::Config(
                "detector-backed redaction must run on the async path".to_string(),
            ));
        }

        let char_len = text.chars().count();
        if char_len <= self.config.chunk_size {
            debug!(chars = char_len, mode = %ExecutionMode::Inline, "redacting");
            let out = self.engine.redact_segment(text, 0);
            return Ok(output_from_segment(out, ExecutionMode::Inline));
        }
        self.redact_chunked(text)
    }

    /// Redact one text on the async path.
    ///
    /// Oversized inputs are chunked; inputs at or above the offload
    /// threshold move to a blocking worker so matcher CPU time never
    /// stalls the runtime. Detector-backed calls already yield at the
    /// network and run inline unless chunked.
    pub async fn redact_async(&self, text: &str) -> Result<EngineOutput> {
        let char_len = text.chars().count();
        let mode = select_mode(char_len, self.config.chunk_size, self.config.async_threshold);
        debug!(chars = char_len, mode = %mode, "redacting async");

        if self.engine.uses_detector() {
            return match mode {
                ExecutionMode::Chunked => self.redact_chunked_detector(text).await,
                // Nothing blocking to offload; the detector await yields
                _ => {
                    let out = self.engine.redact_segment_async(text, 0).await;
                    Ok(output_from_segment(out, ExecutionMode::Inline))
                }
            };
        }

        match mode {
            ExecutionMode::Inline => {
                let out = self.engine.redact_segment(text, 0);
                Ok(output_from_segment(out, ExecutionMode::Inline))
            }
            ExecutionMode::Offloaded => {
                let engine = Arc::clone(&self.engine);
                let owned = text.to_string();
                let out = tokio::task::spawn_blocking(move || engine.redact_segment(&owned, 0))
                    .await
                    .map_err(|e| EngineError::TaskFailed {
                        index: 0,
                        reason: e.to_string(),
                    })?;
                Ok(output_from_segment(out, ExecutionMode::Offloaded))
            }
            ExecutionMode::Chunked => {
                let scheduler = self.clone();
                let owned = text.to_string();
                tokio::task::spawn_blocking(move || scheduler.redact_chunked(&owned))
                    .await
                    .map_err(|e| EngineError::TaskFailed {
                        index: 0,
                        reason: e.to_string(),
                    })?
            }
        }
    }

    /// Redact a batch synchronously. Output order matches input order;
    /// a failed unit is an `Err` at its index.
    pub fn batch(&self, texts: &[String]) -> Vec<Result<EngineOutput>> {
        debug!(items = texts.len(), kind = ?self.task_kind(), "dispatching batch");
        match self.task_kind() {
            TaskKind::CpuBound => self.batch_cpu(texts),
            TaskKind::IoBound => texts
                .iter()
                .map(|_| {
                    Err(EngineError::Config(
                        "detector-backed batches must run on the async path".to_string(),
                    ))
                })
                .collect(),
        }
    }

    fn batch_cpu(&self, texts: &[String]) -> Vec<Result<EngineOutput>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel && texts.len() > 1 {
            let pool = match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.worker_count())
                .build()
            {
                Ok(pool) => pool,
                Err(e) => {
                    let reason = e.to_string();
                    return (0..texts.len())
                        .map(|_| Err(EngineError::ThreadPool(reason.clone())))
                        .collect();
                }
            };
            return pool.install(|| {
                texts
                    .par_iter()
                    .enumerate()
                    .map(|(index, text)| self.redact_guarded(index, text))
                    .collect()
            });
        }

        texts
            .iter()
            .enumerate()
            .map(|(index, text)| self.redact_guarded(index, text))
            .collect()
    }

    /// Redact a batch cooperatively, one task per text.
    pub async fn batch_async(&self, texts: &[String]) -> Vec<Result<EngineOutput>> {
        debug!(items = texts.len(), kind = ?self.task_kind(), "dispatching async batch");

        let mut join_set = JoinSet::new();
        for (index, text) in texts.iter().enumerate() {
            let scheduler = self.clone();
            let owned = text.clone();
            join_set.spawn(async move { (index, scheduler.redact_async(&owned).await) });
        }

        // Index-addressed slots; completion order is irrelevant
        let mut slots: Vec<Option<Result<EngineOutput>>> = Vec::with_capacity(texts.len());
        slots.resize_with(texts.len(), || None);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => warn!(error = %e, "batch unit aborted"),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(EngineError::TaskFailed {
                        index,
                        reason: "unit aborted before completing".to_string(),
                    })
                })
            })
            .collect()
    }

    fn redact_guarded(&self, index: usize, text: &str) -> Result<EngineOutput> {
        // AssertUnwindSafe: matchers are immutable and the store lock
        // recovers from poisoning, so no state outlives a unit panic
        match catch_unwind(AssertUnwindSafe(|| self.redact(text))) {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                warn!(index, reason = %reason, "batch unit panicked");
                Err(EngineError::TaskFailed { index, reason })
            }
        }
    }

    fn redact_chunked(&self, text: &str) -> Result<EngineOutput> {
        let segments = self.chunker.chunk_text(text);
        debug!(
            chunks = segments.len(),
            parallel = self.config.parallel,
            "chunked redaction"
        );
        let outputs = self.run_segments(&segments)?;
        Ok(assemble(outputs, ExecutionMode::Chunked))
    }

    fn run_segments(&self, segments: &[Segment]) -> Result<Vec<SegmentOutput>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel && segments.len() > 1 {
            return self.parallel_executor.run(&self.engine, segments);
        }
        self.sequential_executor.run(&self.engine, segments)
    }

    async fn redact_chunked_detector(&self, text: &str) -> Result<EngineOutput> {
        let segments = self.chunker.chunk_text(text);
        debug!(chunks = segments.len(), "chunked detector fan-out");

        let mut join_set = JoinSet::new();
        for (index, segment) in segments.iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let chunk_text = segment.text.clone();
            let start = segment.start;
            join_set
                .spawn(async move { (index, engine.redact_segment_async(&chunk_text, start).await) });
        }

        let mut slots: Vec<Option<SegmentOutput>> = vec![None; segments.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, output)) => slots[index] = Some(output),
                Err(e) => warn!(error = %e, "segment unit aborted"),
            }
        }

        // An aborted segment passes through unredacted, keeping the
        // merge identity intact
        let outputs: Vec<SegmentOutput> = slots
            .into_iter()
            .zip(segments)
            .map(|(slot, segment)| {
                slot.unwrap_or_else(|| {
                    warn!(offset = segment.start, "segment passed through unredacted");
                    SegmentOutput {
                        text: segment.text,
                        tokens: Vec::new(),
                        detector_failed: true,
                    }
                })
            })
            .collect();

        Ok(assemble(outputs, ExecutionMode::Chunked))
    }
}

fn output_from_segment(out: SegmentOutput, mode: ExecutionMode) -> EngineOutput {
    EngineOutput {
        text: out.text,
        tokens: out.tokens,
        mode,
        chunks: None,
        detector_failures: usize::from(out.detector_failed),
    }
}

fn assemble(outputs: Vec<SegmentOutput>, mode: ExecutionMode) -> EngineOutput {
    let chunks = outputs.len();
    let detector_failures = outputs.iter().filter(|o| o.detector_failed).count();
    let pairs: Vec<(String, Vec<RedactionToken>)> = outputs
        .into_iter()
        .map(|o| (o.text, o.tokens))
        .collect();
    let (text, tokens) = merge_results(pairs);
    EngineOutput {
        text,
        tokens,
        mode,
        chunks: Some(chunks),
        detector_failures,
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unit panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{DetectedEntity, Detector, DetectorError};
    use async_trait::async_trait;
    use redactum_core::{builtin_matchers, CustomPatternMatcher};

    fn local_scheduler(config: EngineConfig) -> Scheduler {
        Scheduler::new(RedactionEngine::with_matchers(builtin_matchers()), config).unwrap()
    }

    fn no_pii_paragraph(repeats: usize) -> String {
        "nothing sensitive in this sentence at all ".repeat(repeats)
    }

    #[test]
    fn test_small_input_runs_inline() {
        let scheduler = local_scheduler(EngineConfig::default());
        let output = scheduler.redact("Email: john@example.com").unwrap();

        assert_eq!(output.mode, ExecutionMode::Inline);
        assert_eq!(output.chunks, None);
        assert!(output.text.starts_with("Email: [EMAIL_"));
        assert_eq!(output.tokens.len(), 1);
    }

    #[test]
    fn test_oversized_input_chunks_and_merges() {
        let config = EngineConfig {
            chunk_size: 50,
            ..EngineConfig::default()
        };
        let scheduler = local_scheduler(config);
        let text = format!(
            "{}email john@example.com here {}",
            no_pii_paragraph(2),
            no_pii_paragraph(2)
        );

        let output = scheduler.redact(&text).unwrap();
        assert_eq!(output.mode, ExecutionMode::Chunked);
        assert!(output.chunks.unwrap() > 1);
        assert!(!output.text.contains("john@example.com"));
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(
            &text[output.tokens[0].start..output.tokens[0].end],
            "john@example.com"
        );
    }

    #[test]
    fn test_chunked_identity_without_matches() {
        let config = EngineConfig {
            chunk_size: 20,
            ..EngineConfig::default()
        };
        let scheduler = local_scheduler(config);
        let text = no_pii_paragraph(10);

        let output = scheduler.redact(&text).unwrap();
        assert_eq!(output.text, text);
        assert!(output.tokens.is_empty());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let text = format!(
            "{}reach me at jane@company.org or 10.1.2.3 {}",
            no_pii_paragraph(3),
            no_pii_paragraph(3)
        );
        let parallel = local_scheduler(EngineConfig {
            chunk_size: 40,
            parallel: true,
            ..EngineConfig::default()
        })
        .redact(&text)
        .unwrap();
        let sequential = local_scheduler(EngineConfig {
            chunk_size: 40,
            parallel: false,
            ..EngineConfig::default()
        })
        .redact(&text)
        .unwrap();

        assert_eq!(parallel.text, sequential.text);
        assert_eq!(parallel.tokens, sequential.tokens);
    }

    #[test]
    fn test_sync_path_rejects_detector_engine() {
        struct NeverDetector;

        #[async_trait]
        impl Detector for NeverDetector {
            async fn detect(&self, _: &str) -> std::result::Result<Vec<DetectedEntity>, DetectorError> {
                Ok(Vec::new())
            }
        }

        let scheduler = Scheduler::new(
            RedactionEngine::with_detector(Arc::new(NeverDetector)),
            EngineConfig::default(),
        )
        .unwrap();

        assert!(matches!(
            scheduler.redact("anything"),
            Err(EngineError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_async_inline_below_threshold() {
        let scheduler = local_scheduler(EngineConfig::default());
        let output = scheduler.redact_async("short 10.0.0.1").await.unwrap();
        assert_eq!(output.mode, ExecutionMode::Inline);
        assert!(output.text.contains("[IP_ADDRESS_"));
    }

    #[tokio::test]
    async fn test_async_offloads_at_threshold() {
        let config = EngineConfig {
            async_threshold: 10,
            ..EngineConfig::default()
        };
        let scheduler = local_scheduler(config);
        let output = scheduler
            .redact_async("this line is past the offload threshold")
            .await
            .unwrap();
        assert_eq!(output.mode, ExecutionMode::Offloaded);
    }

    #[tokio::test]
    async fn test_zero_threshold_always_offloads() {
        let config = EngineConfig {
            async_threshold: 0,
            ..EngineConfig::default()
        };
        let scheduler = local_scheduler(config);
        let output = scheduler.redact_async("x").await.unwrap();
        assert_eq!(output.mode, ExecutionMode::Offloaded);
    }

    #[tokio::test]
    async fn test_async_chunked_matches_sync() {
        let config = EngineConfig {
            chunk_size: 30,
            ..EngineConfig::default()
        };
        let scheduler = local_scheduler(config);
        let text = format!("{}ssn 123-45-6789 inside", no_pii_paragraph(3));

        let sync_output = scheduler.redact(&text).unwrap();
        let async_output = scheduler.redact_async(&text).await.unwrap();

        assert_eq!(async_output.mode, ExecutionMode::Chunked);
        assert_eq!(async_output.text, sync_output.text);
        assert_eq!(async_output.tokens, sync_output.tokens);
    }

    struct SpanDetector;

    #[async_trait]
    impl Detector for SpanDetector {
        // Reports any "secret" word it can find in the segment
        async fn detect(&self, text: &str) -> std::result::Result<Vec<DetectedEntity>, DetectorError> {
            Ok(text
                .match_indices("secret")
                .map(|(at, found)| DetectedEntity {
                    text: found.to_string(),
                    category: "Codeword".to_string(),
                    begin_offset: at,
                    end_offset: at + found.len(),
                    confidence: 0.99,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_detector_chunked_rebases_offsets() {
        let config = EngineConfig {
            chunk_size: 25,
            ..EngineConfig::default()
        };
        let scheduler = Scheduler::new(
            RedactionEngine::with_detector(Arc::new(SpanDetector)),
            config,
        )
        .unwrap();
        let text = "plain filler words here secret and later another secret too";

        let output = scheduler.redact_async(text).await.unwrap();
        assert_eq!(output.mode, ExecutionMode::Chunked);
        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.detector_failures, 0);
        for token in &output.tokens {
            assert_eq!(&text[token.start..token.end], "secret");
            assert!(token.id.starts_with("[CODEWORD_"));
        }
        assert!(!output.text.contains("secret"));
    }

    struct FlakyDetector;

    #[async_trait]
    impl Detector for FlakyDetector {
        async fn detect(&self, text: &str) -> std::result::Result<Vec<DetectedEntity>, DetectorError> {
            if text.contains("poison") {
                Err(DetectorError::Unavailable("throttled".to_string()))
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_detector_failure_counted_not_fatal() {
        let config = EngineConfig {
            chunk_size: 20,
            ..EngineConfig::default()
        };
        let scheduler = Scheduler::new(
            RedactionEngine::with_detector(Arc::new(FlakyDetector)),
            config,
        )
        .unwrap();
        let text = "clean words first then poison appears in the middle somewhere";

        let output = scheduler.redact_async(text).await.unwrap();
        assert_eq!(output.text, text);
        assert!(output.detector_failures >= 1);
    }

    #[test]
    fn test_batch_preserves_order() {
        let scheduler = local_scheduler(EngineConfig::default());
        let texts = vec![
            "first john@example.com".to_string(),
            "second has nothing".to_string(),
            "third 123-45-6789".to_string(),
        ];

        let results = scheduler.batch(&texts);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().text.starts_with("first [EMAIL_"));
        assert_eq!(results[1].as_ref().unwrap().text, "second has nothing");
        assert!(results[2].as_ref().unwrap().text.starts_with("third [SSN_"));
    }

    #[test]
    fn test_batch_isolates_panicking_unit() {
        let trap = CustomPatternMatcher::new("trap", r"boom")
            .unwrap()
            .with_validator(|_| panic!("validator blew up"));
        let mut matchers = builtin_matchers();
        matchers.push(Arc::new(trap));
        let scheduler = Scheduler::new(
            RedactionEngine::with_matchers(matchers),
            EngineConfig::default(),
        )
        .unwrap();

        let texts = vec![
            "fine john@example.com".to_string(),
            "boom goes this one".to_string(),
            "also fine".to_string(),
        ];
        let results = scheduler.batch(&texts);

        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(EngineError::TaskFailed { index: 1, .. })
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_empty_batch() {
        let scheduler = local_scheduler(EngineConfig::default());
        assert!(scheduler.batch(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_batch_async_preserves_order() {
        let scheduler = local_scheduler(EngineConfig::default());
        let texts: Vec<String> = (0..16)
            .map(|i| format!("item {i} mail user{i}@example.com"))
            .collect();

        let results = scheduler.batch_async(&texts).await;
        assert_eq!(results.len(), texts.len());
        for (i, result) in results.iter().enumerate() {
            let output = result.as_ref().unwrap();
            assert!(output.text.starts_with(&format!("item {i} mail [EMAIL_")));
        }
    }

    #[tokio::test]
    async fn test_batch_async_detector_engine() {
        let scheduler = Scheduler::new(
            RedactionEngine::with_detector(Arc::new(SpanDetector)),
            EngineConfig::default(),
        )
        .unwrap();
        let texts = vec![
            "a secret here".to_string(),
            "nothing at all".to_string(),
        ];

        let results = scheduler.batch_async(&texts).await;
        assert!(!results[0].as_ref().unwrap().text.contains("secret"));
        assert_eq!(results[1].as_ref().unwrap().text, "nothing at all");
    }
}
