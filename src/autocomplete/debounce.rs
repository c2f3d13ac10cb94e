//! Keystroke debouncing for suggestion requests

use super::SuggestionSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// What the suggestion list should do after an input change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    Show {
        query: String,
        suggestions: Vec<String>,
    },
    Hide,
}

/// Delays suggestion fetches until input has been quiet for `delay`
///
/// Each input supersedes the previous one: a pending fetch is aborted, and a
/// response that arrives for a superseded input is never emitted.
pub struct Debouncer {
    source: Arc<dyn SuggestionSource>,
    delay: Duration,
    min_length: usize,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    events: mpsc::UnboundedSender<SuggestionEvent>,
}

impl Debouncer {
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        delay: Duration,
        min_length: usize,
    ) -> (Self, mpsc::UnboundedReceiver<SuggestionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            source,
            delay,
            min_length,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            events,
        };
        (debouncer, rx)
    }

    /// Feed the current contents of the input. Must run inside a tokio runtime.
    pub fn input(&self, text: &str) {
        let generation = self.supersede();
        let query = text.trim().to_string();

        if query.chars().count() < self.min_length {
            let _ = self.events.send(SuggestionEvent::Hide);
            return;
        }

        let source = Arc::clone(&self.source);
        let current = Arc::clone(&self.generation);
        let events = self.events.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let suggestions = source.suggest(&query).await;
            if current.load(Ordering::SeqCst) != generation {
                trace!("Discarding stale suggestions for '{}'", query);
                return;
            }

            let event = if suggestions.is_empty() {
                SuggestionEvent::Hide
            } else {
                SuggestionEvent::Show { query, suggestions }
            };
            let _ = events.send(event);
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    /// Drop any pending fetch and hide the list
    pub fn dismiss(&self) {
        self.supersede();
        let _ = self.events.send(SuggestionEvent::Hide);
    }

    fn supersede(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
        generation
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
