//! Debounced place-name autocomplete.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

use crate::{model::LocationSuggestion, provider::WeatherClient, state::StateHolder};

pub const MIN_CHARS: usize = 2;
pub const DEBOUNCE_MS: u64 = 300;
pub const DEBOUNCE: Duration = Duration::from_millis(DEBOUNCE_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionPolicy {
    /// Queries shorter than this (after trimming) never reach the network.
    pub min_chars: usize,
    /// Quiet period after the last keystroke before searching.
    pub debounce: Duration,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self { min_chars: MIN_CHARS, debounce: DEBOUNCE }
    }
}

/// Turns text-change events into at most one live suggestion search.
///
/// Each call to [`on_query_changed`](Self::on_query_changed) supersedes the
/// previous one: its timer (or in-flight search) is aborted and any result it
/// still manages to produce is dropped. Search failures degrade to an empty
/// list. Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct SearchSuggestionController {
    client: Arc<dyn WeatherClient>,
    policy: SuggestionPolicy,
    suggestions: Arc<StateHolder<Vec<LocationSuggestion>>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSuggestionController {
    pub fn new(client: Arc<dyn WeatherClient>, policy: SuggestionPolicy) -> Self {
        Self {
            client,
            policy,
            suggestions: Arc::new(StateHolder::new(Vec::new())),
            pending: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> SuggestionPolicy {
        self.policy
    }

    pub fn suggestions(&self) -> Vec<LocationSuggestion> {
        self.suggestions.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<LocationSuggestion>> {
        self.suggestions.subscribe()
    }

    pub fn on_query_changed(&self, text: &str) {
        self.cancel_pending();

        let query = text.trim().to_string();
        if query.chars().count() < self.policy.min_chars {
            self.suggestions.replace_and_invalidate(Vec::new());
            return;
        }

        let generation = self.suggestions.invalidate();
        let client = Arc::clone(&self.client);
        let suggestions = Arc::clone(&self.suggestions);
        let debounce = self.policy.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if suggestions.current_generation() != generation {
                return;
            }

            let list = match client.search_suggestions(&query).await {
                Ok(list) => list,
                Err(err) => {
                    debug!(%query, error = %err, "suggestion search failed");
                    Vec::new()
                }
            };

            if !suggestions.publish_if_current(generation, list) {
                debug!(%query, "dropping superseded suggestions");
            }
        });

        self.store_pending(handle);
    }

    pub fn clear_suggestions(&self) {
        self.cancel_pending();
        self.suggestions.replace_and_invalidate(Vec::new());
    }

    fn cancel_pending(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }

    fn store_pending(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending = Some(handle);
    }
}

impl Drop for SearchSuggestionController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
