//! User-action driven weather lookup session.
//!
//! ```text
//! submit / select / location fix ──► SessionOrchestrator ──► WeatherClient (task)
//!                                          │                      │
//!                                          ▼                      ▼
//!                               RequestState: Loading ──► Success | Error
//!                                          ▲
//!                     reset ───────────────┘ (Idle, orphans the task)
//! ```
//!
//! Only the most recently dispatched lookup may write its outcome; anything
//! older settles into the void.

use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    model::{LocationSuggestion, WeatherSnapshot},
    provider::WeatherClient,
    state::{RequestState, StateHolder},
    suggestions::{SearchSuggestionController, SuggestionPolicy},
};

pub type WeatherState = RequestState<WeatherSnapshot>;

/// Outcome reported by the device location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    Fix { lat: f64, lon: f64 },
    PermissionDenied,
    Unavailable,
}

#[derive(Debug)]
pub struct SessionOrchestrator {
    client: Arc<dyn WeatherClient>,
    forecast_days: Option<u8>,
    state: Arc<StateHolder<WeatherState>>,
    suggestions: SearchSuggestionController,
    query_text: watch::Sender<String>,
    location_disabled: watch::Sender<bool>,
}

impl SessionOrchestrator {
    /// `forecast_days = None` requests current conditions only.
    pub fn new(
        client: Arc<dyn WeatherClient>,
        forecast_days: Option<u8>,
        policy: SuggestionPolicy,
    ) -> Self {
        let suggestions = SearchSuggestionController::new(Arc::clone(&client), policy);
        Self {
            client,
            forecast_days,
            state: Arc::new(StateHolder::new(RequestState::Idle)),
            suggestions,
            query_text: watch::Sender::new(String::new()),
            location_disabled: watch::Sender::new(false),
        }
    }

    /// Start a lookup for `location_query`.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the state is
    /// `Loading` by the time this returns; the handle resolves once the fetch
    /// has settled (whether or not its outcome was still wanted). Must be
    /// called from within a tokio runtime.
    pub fn submit(&self, location_query: &str) -> Option<JoinHandle<()>> {
        let query = location_query.trim();
        if query.is_empty() {
            debug!("ignoring blank lookup");
            return None;
        }

        self.suggestions.clear_suggestions();

        let generation = self.state.replace_and_invalidate(RequestState::Loading);
        info!(query, generation, "dispatching weather lookup");

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let forecast_days = self.forecast_days;
        let query = query.to_string();

        Some(tokio::spawn(async move {
            let outcome = match client.fetch_weather(&query, forecast_days).await {
                Ok(snapshot) => RequestState::Success(snapshot),
                Err(err) => {
                    warn!(%query, error = ?err, "weather lookup failed");
                    RequestState::Error(err.to_string())
                }
            };

            if !state.publish_if_current(generation, outcome) {
                debug!(%query, generation, "discarding stale lookup result");
            }
        }))
    }

    pub fn submit_by_coordinates(&self, lat: f64, lon: f64) -> Option<JoinHandle<()>> {
        self.submit(&format!("{lat},{lon}"))
    }

    /// Feed the device location provider's answer into the session.
    pub fn on_location_result(&self, fix: LocationFix) -> Option<JoinHandle<()>> {
        match fix {
            LocationFix::Fix { lat, lon } => {
                self.location_disabled.send_replace(false);
                self.submit_by_coordinates(lat, lon)
            }
            LocationFix::PermissionDenied | LocationFix::Unavailable => {
                debug!(?fix, "device location not available");
                self.location_disabled.send_replace(true);
                None
            }
        }
    }

    pub fn select_suggestion(&self, suggestion: &LocationSuggestion) -> Option<JoinHandle<()>> {
        self.query_text.send_replace(suggestion.name.clone());
        self.submit(&suggestion.name)
    }

    /// Back to the search screen: `Idle`, query text cleared. Any lookup still
    /// in flight is orphaned.
    pub fn reset(&self) {
        self.state.replace_and_invalidate(RequestState::Idle);
        self.query_text.send_replace(String::new());
    }

    /// Text-field change event.
    pub fn pick_suggestion_query(&self, text: &str) {
        self.query_text.send_replace(text.to_string());
        self.suggestions.on_query_changed(text);
    }

    pub fn clear_suggestions(&self) {
        self.suggestions.clear_suggestions();
    }

    pub fn state(&self) -> WeatherState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn suggestions(&self) -> Vec<LocationSuggestion> {
        self.suggestions.suggestions()
    }

    pub fn subscribe_suggestions(&self) -> watch::Receiver<Vec<LocationSuggestion>> {
        self.suggestions.subscribe()
    }

    pub fn suggestion_policy(&self) -> SuggestionPolicy {
        self.suggestions.policy()
    }

    pub fn query_text(&self) -> String {
        self.query_text.borrow().clone()
    }

    pub fn location_disabled(&self) -> bool {
        *self.location_disabled.borrow()
    }

    pub fn subscribe_location_disabled(&self) -> watch::Receiver<bool> {
        self.location_disabled.subscribe()
    }
}
