//! Debounced actions.
//!
//! Every input starts a timer and cancels the previous one; the action runs
//! only when a timer completes uninterrupted, with the latest value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sylva_core::listing::{QueryParams, SEARCH_KEY, apply_filter_change};

/// Quiescence window of the search box.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

struct Pending<V> {
    generation: u64,
    value: Option<V>,
    timer: Option<JoinHandle<()>>,
}

type Action<V> = Arc<dyn Fn(V) + Send + Sync>;

/// Cancellable-timer debouncer. Must be used inside a tokio runtime.
pub struct Debouncer<V> {
    window: Duration,
    action: Action<V>,
    pending: Arc<Mutex<Pending<V>>>,
}

impl<V: Send + 'static> Debouncer<V> {
    pub fn new(window: Duration, action: impl Fn(V) + Send + Sync + 'static) -> Self {
        Self {
            window,
            action: Arc::new(action),
            pending: Arc::new(Mutex::new(Pending {
                generation: 0,
                value: None,
                timer: None,
            })),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a new value and restart the timer.
    pub fn push(&self, value: V) {
        let mut pending = lock(&self.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation += 1;
        pending.value = Some(value);

        let generation = pending.generation;
        let window = self.window;
        let action = self.action.clone();
        let shared = self.pending.clone();

        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let value = {
                let mut pending = lock(&shared);
                // A newer push owns the slot now.
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
                pending.value.take()
            };
            if let Some(value) = value {
                action(value);
            }
        }));
    }

    /// Drop the pending value without running the action.
    pub fn cancel(&self) {
        let mut pending = lock(&self.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation += 1;
        pending.value = None;
    }

    /// Run the action now with the pending value, if any.
    pub fn flush(&self) {
        let value = {
            let mut pending = lock(&self.pending);
            if let Some(timer) = pending.timer.take() {
                timer.abort();
            }
            pending.generation += 1;
            pending.value.take()
        };
        if let Some(value) = value {
            (self.action)(value);
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).value.is_some()
    }
}

impl<V> Drop for Debouncer<V> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.pending).timer.take() {
            timer.abort();
        }
    }
}

fn lock<V>(pending: &Mutex<Pending<V>>) -> MutexGuard<'_, Pending<V>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Search box driver: turns keystrokes into at most one navigation per
/// quiescence window.
pub struct SearchDebouncer {
    inner: Debouncer<String>,
}

impl SearchDebouncer {
    /// Navigations (URLs) are sent on `navigate`. `params` is the listing's
    /// current URL state; the page key is dropped on every search.
    pub fn new(
        base_path: impl Into<String>,
        params: QueryParams,
        window: Duration,
        navigate: mpsc::UnboundedSender<String>,
    ) -> Self {
        let base_path = base_path.into();
        let inner = Debouncer::new(window, move |text: String| {
            let (_, url) = apply_filter_change(&base_path, &params, SEARCH_KEY, text);
            if navigate.send(url).is_err() {
                tracing::debug!("Search navigation dropped, receiver closed");
            }
        });
        Self { inner }
    }

    pub fn input(&self, text: &str) {
        self.inner.push(text.to_string());
    }

    /// Submit immediately (enter key).
    pub fn submit(&self) {
        self.inner.flush();
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }
}
