//! Token persistence and unmasking
//!
//! The store keeps every token emitted across calls, keyed by token id.
//! Handles are cheap clones sharing one map, so a scheduler, its batch
//! workers, and the caller all observe the same state.

use redactum_core::RedactionToken;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, thread-safe store of redaction tokens.
///
/// Cloning produces another handle to the same underlying map.
#[derive(Clone, Default)]
pub struct TokenStore {
    tokens: Arc<Mutex<HashMap<String, RedactionToken>>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<String, RedactionToken>> {
        // A poisoned lock means a panic elsewhere, not a corrupt map
        self.tokens.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a token, replacing any previous entry with the same id.
    pub fn insert(&self, token: RedactionToken) {
        self.guard().insert(token.id.clone(), token);
    }

    /// Record a batch of tokens under one lock acquisition.
    pub fn extend<I>(&self, tokens: I)
    where
        I: IntoIterator<Item = RedactionToken>,
    {
        let mut map = self.guard();
        for token in tokens {
            map.insert(token.id.clone(), token);
        }
    }

    /// Look up a token by id.
    pub fn get(&self, id: &str) -> Option<RedactionToken> {
        self.guard().get(id).cloned()
    }

    /// Snapshot of token id to original value, for audit or export.
    pub fn token_map(&self) -> HashMap<String, String> {
        self.guard()
            .iter()
            .map(|(id, token)| (id.clone(), token.original_value.clone()))
            .collect()
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether the store holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.guard().len() == 0
    }

    /// Drop all stored tokens. Previously redacted text can no longer
    /// be unmasked afterwards.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Restore original values for every stored token id found in `text`.
    ///
    /// Ids for which the store has no entry are left in place.
    pub fn unmask(&self, text: &str) -> String {
        let tokens: Vec<RedactionToken> = self.guard().values().cloned().collect();
        unmask_with(text, &tokens)
    }
}

impl fmt::Debug for TokenStore {
    // Deliberately omits token contents; the store holds raw PII
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("tokens", &self.guard().len())
            .finish()
    }
}

/// Replace each token's id in `text` with its original value.
///
/// Tokens are applied in descending start order and each replaces only
/// the first occurrence of its id, so a value that happens to embed
/// another token's id never gets rewritten twice.
pub fn unmask_with(text: &str, tokens: &[RedactionToken]) -> String {
    let mut ordered: Vec<&RedactionToken> = tokens.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut out = text.to_string();
    for token in ordered {
        out = out.replacen(&token.id, &token.original_value, 1);
    }
    out
}
