use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type Handler<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Collapses bursts of calls into one handler invocation, `delay` after the
/// last call, with that call's argument.
///
/// Only the timer is cancelled by a newer call. Once the handler has started
/// it runs to completion on its own task.
pub struct Debouncer<T> {
    delay: Duration,
    handler: Handler<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
    shutdown: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            handler: Arc::new(move |arg| Box::pin(handler(arg))),
            pending: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn call(&self, arg: T) {
        if self.shutdown.is_cancelled() {
            return;
        }

        let handler = Arc::clone(&self.handler);
        let delay = self.delay;
        let shutdown = self.shutdown.clone();

        let timer = tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    tokio::spawn(handler(arg));
                }
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// Cancels the pending invocation and ignores every later call.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        self.cancel();
    }
}
