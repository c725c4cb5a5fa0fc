//! High-level configuration API

use crate::error::{ApiError, Result};
use redactum_core::{builtin_matcher, Matcher, PiiCategory};
use redactum_engine::{Detector, EngineConfig, TokenStore};
use std::fmt;
use std::sync::Arc;

/// High-level configuration for a [`Redactor`](crate::Redactor)
#[derive(Clone)]
pub struct Config {
    pub(crate) engine: EngineConfig,
    pub(crate) use_detector: bool,
    pub(crate) detector: Option<Arc<dyn Detector>>,
    pub(crate) categories: Option<Vec<PiiCategory>>,
    pub(crate) matchers: Vec<Arc<dyn Matcher>>,
    pub(crate) store: Option<TokenStore>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            use_detector: false,
            detector: None,
            categories: None,
            matchers: Vec::new(),
            store: None,
        }
    }
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("chunk_size", &self.engine.chunk_size)
            .field("parallel", &self.engine.parallel)
            .field("max_workers", &self.engine.max_workers)
            .field("async_threshold", &self.engine.async_threshold)
            .field("use_detector", &self.use_detector)
            .field("categories", &self.categories)
            .field("custom_matchers", &self.matchers.len())
            .finish()
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the chunking window in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.engine.chunk_size = size;
        self
    }

    /// Enable or disable parallel chunk processing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.engine.parallel = parallel;
        self
    }

    /// Cap the per-call worker pool. `None` keeps the hardware
    /// concurrency default.
    pub fn max_workers(mut self, workers: Option<usize>) -> Self {
        self.config.engine.max_workers = workers;
        self
    }

    /// Set the offload threshold in characters for async calls.
    /// `0` offloads every call.
    pub fn async_threshold(mut self, chars: usize) -> Self {
        self.config.engine.async_threshold = chars;
        self
    }

    /// Route detection through an external detector instead of the
    /// local matchers. Requires [`detector`](Self::detector).
    pub fn use_detector(mut self, use_detector: bool) -> Self {
        self.config.use_detector = use_detector;
        self
    }

    /// Supply the detector implementation and enable detector mode.
    pub fn detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.config.detector = Some(detector);
        self.config.use_detector = true;
        self
    }

    /// Restrict the built-in matchers to the given categories, applied
    /// in the given order. Custom categories go through
    /// [`matcher`](Self::matcher) instead.
    pub fn categories(mut self, categories: &[PiiCategory]) -> Self {
        self.config.categories = Some(categories.to_vec());
        self
    }

    /// Register an additional matcher, appended after the built-ins.
    /// Registration order sets overlap priority among custom matchers.
    pub fn matcher(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.config.matchers.push(matcher);
        self
    }

    /// Share a caller-owned token store instead of a fresh one.
    pub fn token_store(mut self, store: TokenStore) -> Self {
        self.config.store = Some(store);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if self.config.engine.chunk_size == 0 {
            return Err(ApiError::Config("chunk_size must be positive".to_string()));
        }
        if self.config.engine.max_workers == Some(0) {
            return Err(ApiError::Config("max_workers must be positive".to_string()));
        }
        if self.config.use_detector && self.config.detector.is_none() {
            return Err(ApiError::Config(
                "use_detector set but no detector supplied".to_string(),
            ));
        }
        if let Some(categories) = &self.config.categories {
            for category in categories {
                if builtin_matcher(category).is_none() {
                    return Err(ApiError::Config(format!(
                        "no built-in matcher for category '{category}'; register one with matcher()"
                    )));
                }
            }
        }

        Ok(self.config)
    }

    /// Build the configuration and construct a [`Redactor`](crate::Redactor)
    /// from it in one step.
    pub fn build_redactor(self) -> Result<crate::Redactor> {
        let config = self.build()?;
        crate::Redactor::with_config(config)
    }
}
