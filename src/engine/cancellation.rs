//! Cooperative cancellation shared between the search controller and a running fetch.
//!
//! [`create`] hands out a [`CancellationSource`] (the trigger, kept by the controller)
//! and a [`CancellationToken`] (the observer, moved into the fetch). Both point at the
//! same flag, so `cancel()` on the UI thread is visible to the fetch thread without
//! any further synchronisation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

type Callback = Box<dyn FnOnce() + Send + 'static>;

struct Shared {
    cancelled: AtomicBool,
    released: AtomicBool,
    callbacks: Mutex<Vec<Callback>>,
}

impl Shared {
    fn callbacks(&self) -> MutexGuard<'_, Vec<Callback>> {
        // A panicking callback must not wedge later cancellations.
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Creates a fresh, uncancelled token paired with its trigger.
pub fn create() -> (CancellationSource, CancellationToken) {
    let shared = Arc::new(Shared {
        cancelled: AtomicBool::new(false),
        released: AtomicBool::new(false),
        callbacks: Mutex::new(Vec::new()),
    });
    (
        CancellationSource {
            shared: shared.clone(),
        },
        CancellationToken { shared },
    )
}

/// The triggering half. Clones trigger the same token.
#[derive(Clone)]
pub struct CancellationSource {
    shared: Arc<Shared>,
}

impl CancellationSource {
    /// Requests cancellation. Returns `true` only for the call that actually flipped
    /// the flag; repeated calls, and calls after [`release`](Self::release), do nothing.
    pub fn cancel(&self) -> bool {
        if self.shared.released.load(Ordering::Acquire) {
            return false;
        }
        if self.shared.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }

        // Run callbacks outside the lock so they may touch the token themselves.
        let callbacks = std::mem::take(&mut *self.shared.callbacks());
        for callback in callbacks {
            callback();
        }
        true
    }

    /// Disposes of the trigger. Pending callbacks are dropped without being run and
    /// any clone left behind (e.g. a timeout timer) becomes inert.
    pub fn release(self) {
        self.shared.released.store(true, Ordering::Release);
        self.shared.callbacks().clear();
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            shared: self.shared.clone(),
        }
    }
}

/// The observing half, handed to the fetch operation.
#[derive(Clone)]
pub struct CancellationToken {
    shared: Arc<Shared>,
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }

    /// Registers `callback` to run once, on the thread that cancels.
    /// If cancellation already happened it runs immediately on the caller's thread.
    /// Registrations on a released token are dropped.
    pub fn on_cancelled<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut callbacks = self.shared.callbacks();
            if self.shared.released.load(Ordering::Acquire) {
                return;
            }
            // Checked under the lock: `cancel` sets the flag before draining, so either
            // we see the flag here or the drain sees our callback.
            if !self.is_cancelled() {
                callbacks.push(Box::new(callback));
                return;
            }
        }
        callback();
    }

    /// Resolves once the token is cancelled, or once its source is released
    /// (whichever happens first). Check [`is_cancelled`](Self::is_cancelled)
    /// afterwards if the distinction matters.
    pub fn cancelled(&self) -> impl Future<Output = ()> + Send + 'static {
        let (tx, rx) = oneshot::channel::<()>();
        self.on_cancelled(move || {
            let _ = tx.send(());
        });
        async move {
            // Err means the sender was dropped: released, or registration refused.
            let _ = rx.await;
        }
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn fresh_token_is_not_cancelled() {
        let (source, token) = create();
        assert!(!token.is_cancelled());
        assert!(!source.token().is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent_and_fires_callback_once() {
        let (source, token) = create();
        let (count, callback) = counter();
        token.on_cancelled(callback);

        assert!(source.cancel());
        assert!(!source.cancel());

        assert!(token.is_cancelled());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_registration_fires_immediately() {
        let (source, token) = create();
        source.cancel();

        let (count, callback) = counter();
        token.on_cancelled(callback);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn release_drops_callbacks_and_disarms_clones() {
        let (source, token) = create();
        let timer = source.clone();
        let (count, callback) = counter();
        token.on_cancelled(callback);

        source.release();
        assert!(!timer.cancel());

        assert!(!token.is_cancelled());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn release_after_cancel_does_not_rerun_callbacks() {
        let (source, token) = create();
        let (count, callback) = counter();
        token.on_cancelled(callback);

        source.cancel();
        source.release();

        assert!(token.is_cancelled());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_from_another_thread_is_visible() {
        let (source, token) = create();
        let handle = std::thread::spawn(move || source.cancel());
        assert!(handle.join().unwrap());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_resolves_on_cancel() {
        let (source, token) = create();
        let waiter = tokio::spawn(token.cancelled());

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(!waiter.is_finished());

        source.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_future_resolves_on_release() {
        let (source, token) = create();
        let waiter = token.cancelled();
        source.release();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() should resolve once released");
        assert!(!token.is_cancelled());
    }
}
