//! Public API for reversible PII redaction
//!
//! This crate provides a clean, stable interface over the redaction
//! pipeline that hides engine internals. Text goes in; redacted text
//! plus deterministic, reversible tokens come out.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use redactum_core::builtin_matcher;
use redactum_engine::{unmask_with, EngineOutput, RedactionEngine, Scheduler};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{RedactionMetadata, RedactionOutput};
pub use error::ApiError;
pub use redactum_core::{
    builtin_matchers, CustomPatternMatcher, Matcher, PiiCategory, RedactionToken,
};
pub use redactum_engine::{
    DetectedEntity, Detector, DetectorError, EngineError, ExecutionMode, TokenStore,
};

/// Main entry point for reversible text redaction
///
/// Wraps the scheduler and a shared token store behind a stable surface.
/// Cloned handles of the store observe every insertion, so a `Redactor`
/// built with a caller-supplied store shares session state with it.
pub struct Redactor {
    scheduler: Scheduler,
    store: TokenStore,
    config: Config,
    runtime: OnceLock<tokio::runtime::Runtime>,
}

impl Redactor {
    /// Create a redactor with the default configuration: all built-in
    /// matchers, 5000-char chunks, parallel chunk processing.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a redactor with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let engine = if config.use_detector {
            let detector = config.detector.clone().ok_or_else(|| {
                ApiError::Config("use_detector set but no detector supplied".to_string())
            })?;
            RedactionEngine::with_detector(detector)
        } else {
            let mut matchers: Vec<Arc<dyn Matcher>> = match &config.categories {
                Some(categories) => {
                    let mut selected = Vec::with_capacity(categories.len());
                    for category in categories {
                        let matcher = builtin_matcher(category).ok_or_else(|| {
                            ApiError::Config(format!(
                                "no built-in matcher for category '{category}'"
                            ))
                        })?;
                        selected.push(matcher);
                    }
                    selected
                }
                None => builtin_matchers(),
            };
            matchers.extend(config.matchers.iter().cloned());
            RedactionEngine::with_matchers(matchers)
        };

        let scheduler = Scheduler::new(engine, config.engine.clone())?;
        let store = config.store.clone().unwrap_or_default();

        Ok(Self {
            scheduler,
            store,
            config,
            runtime: OnceLock::new(),
        })
    }

    /// Redact one text synchronously.
    ///
    /// With `store_tokens` set the emitted tokens are also recorded in
    /// the shared store so a later [`unmask`](Self::unmask) can reverse
    /// them without an explicit token slice.
    ///
    /// When a detector is configured this drives the async path on an
    /// internally owned runtime and therefore must not be called from
    /// inside a tokio runtime; use [`redact_async`](Self::redact_async)
    /// there.
    pub fn redact(&self, text: &str, store_tokens: bool) -> Result<RedactionOutput> {
        let start = Instant::now();
        if text.is_empty() {
            return Ok(self.empty_output(start));
        }
        let total_chars = text.chars().count();

        let output = if self.config.use_detector {
            self.runtime()?.block_on(self.scheduler.redact_async(text))?
        } else {
            self.scheduler.redact(text)?
        };

        Ok(self.finish(output, total_chars, start, store_tokens))
    }

    /// Redact one text on the async path, with identical semantics.
    pub async fn redact_async(&self, text: &str, store_tokens: bool) -> Result<RedactionOutput> {
        let start = Instant::now();
        if text.is_empty() {
            return Ok(self.empty_output(start));
        }
        let total_chars = text.chars().count();

        let output = self.scheduler.redact_async(text).await?;
        Ok(self.finish(output, total_chars, start, store_tokens))
    }

    /// Redact a batch synchronously.
    ///
    /// Output order matches input order and every item carries its own
    /// result; one failed unit never aborts its siblings.
    /// `processing_time_ms` on batch items reports the wall clock of
    /// the whole batch call.
    pub fn batch_redact(
        &self,
        texts: &[String],
        store_tokens: bool,
    ) -> Vec<Result<RedactionOutput>> {
        let start = Instant::now();

        let results = if self.config.use_detector {
            match self.runtime() {
                Ok(runtime) => runtime.block_on(self.scheduler.batch_async(texts)),
                Err(e) => {
                    let reason = e.to_string();
                    return texts
                        .iter()
                        .map(|_| Err(ApiError::Config(reason.clone())))
                        .collect();
                }
            }
        } else {
            self.scheduler.batch(texts)
        };

        self.finish_batch(results, texts, start, store_tokens)
    }

    /// Redact a batch on the async path, with identical semantics.
    pub async fn batch_redact_async(
        &self,
        texts: &[String],
        store_tokens: bool,
    ) -> Vec<Result<RedactionOutput>> {
        let start = Instant::now();
        let results = self.scheduler.batch_async(texts).await;
        self.finish_batch(results, texts, start, store_tokens)
    }

    /// Replace token ids in `redacted_text` with their original values.
    ///
    /// With `tokens` supplied only that slice is applied; otherwise
    /// every token in the shared store is considered. Ids with no
    /// mapping are left in place.
    pub fn unmask(&self, redacted_text: &str, tokens: Option<&[RedactionToken]>) -> String {
        match tokens {
            Some(tokens) => unmask_with(redacted_text, tokens),
            None => self.store.unmask(redacted_text),
        }
    }

    /// Snapshot of every stored token id and its original value.
    pub fn get_token_map(&self) -> HashMap<String, String> {
        self.store.token_map()
    }

    /// Drop all stored tokens. Text redacted so far can no longer be
    /// unmasked through the store.
    pub fn clear_token_store(&self) {
        self.store.clear();
    }

    /// Shared handle to the token store.
    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn finish(
        &self,
        output: EngineOutput,
        total_chars: usize,
        start: Instant,
        store_tokens: bool,
    ) -> RedactionOutput {
        if store_tokens {
            self.store.extend(output.tokens.iter().cloned());
        }
        RedactionOutput {
            redacted_text: output.text,
            tokens: output.tokens,
            metadata: RedactionMetadata {
                total_chars,
                processing_time_ms: start.elapsed().as_millis() as u64,
                mode_used: output.mode.to_string(),
                chunks_processed: output.chunks,
                detector_failures: output.detector_failures,
            },
        }
    }

    fn finish_batch(
        &self,
        results: Vec<redactum_engine::Result<EngineOutput>>,
        texts: &[String],
        start: Instant,
        store_tokens: bool,
    ) -> Vec<Result<RedactionOutput>> {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        results
            .into_iter()
            .zip(texts)
            .map(|(result, text)| -> Result<RedactionOutput> {
                let output = result?;
                if store_tokens {
                    self.store.extend(output.tokens.iter().cloned());
                }
                Ok(RedactionOutput {
                    redacted_text: output.text,
                    tokens: output.tokens,
                    metadata: RedactionMetadata {
                        total_chars: text.chars().count(),
                        processing_time_ms: elapsed_ms,
                        mode_used: output.mode.to_string(),
                        chunks_processed: output.chunks,
                        detector_failures: output.detector_failures,
                    },
                })
            })
            .collect()
    }

    fn empty_output(&self, start: Instant) -> RedactionOutput {
        RedactionOutput {
            redacted_text: String::new(),
            tokens: Vec::new(),
            metadata: RedactionMetadata {
                total_chars: 0,
                processing_time_ms: start.elapsed().as_millis() as u64,
                mode_used: ExecutionMode::Inline.to_string(),
                chunks_processed: None,
                detector_failures: 0,
            },
        }
    }

    fn runtime(&self) -> Result<&tokio::runtime::Runtime> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
        Ok(self.runtime.get_or_init(|| runtime))
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new().expect("default redactor creation should not fail")
    }
}

// Convenience functions

/// Redact text with the default configuration
pub fn redact_text(text: &str) -> Result<RedactionOutput> {
    let redactor = Redactor::new()?;
    redactor.redact(text, true)
}

/// Redact text with only the given built-in categories active
pub fn redact_text_with_categories(
    text: &str,
    categories: &[PiiCategory],
) -> Result<RedactionOutput> {
    let config = Config::builder().categories(categories).build()?;
    let redactor = Redactor::with_config(config)?;
    redactor.redact(text, true)
}
