//! Observable request state.
//!
//! [`StateHolder`] is a single-writer cell built on a `tokio::sync::watch`
//! channel: renderers `subscribe()` and are woken on every change, while the
//! owner publishes. Async work that settles later carries the generation
//! number it was started under and may only publish while that generation is
//! still the latest one.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// What the current weather lookup is doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// `true` once a request has produced either data or an error.
    pub fn is_settled(&self) -> bool {
        matches!(self, RequestState::Success(_) | RequestState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Generation token handed to async work; see [`StateHolder::publish_if_current`].
pub type Generation = u64;

#[derive(Debug)]
pub struct StateHolder<T> {
    tx: watch::Sender<T>,
    generation: AtomicU64,
}

impl<T> StateHolder<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx, generation: AtomicU64::new(0) }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn current_generation(&self) -> Generation {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the value and start a new generation. Anything started under an
    /// older generation can no longer publish.
    pub fn replace_and_invalidate(&self, value: T) -> Generation {
        let mut generation = 0;
        self.tx.send_modify(|slot| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *slot = value;
        });
        generation
    }

    /// Start a new generation without touching the value.
    pub fn invalidate(&self) -> Generation {
        let mut generation = 0;
        self.tx.send_if_modified(|_| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });
        generation
    }

    /// Publish `value` only if `generation` is still the latest one.
    /// Returns whether the value was applied.
    pub fn publish_if_current(&self, generation: Generation, value: T) -> bool {
        self.tx.send_if_modified(|slot| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *slot = value;
            true
        })
    }
}

impl<T: Clone> StateHolder<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}
