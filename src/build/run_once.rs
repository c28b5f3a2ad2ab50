//! Run-once guard shared by every hook path of a build
//!
//! A host may fire both the post-compile hook and the bundler `done` hook in
//! the same build, sometimes back to back before the first one has finished.
//! The guard collapses all of them into a single execution.

use crate::build::host::{AsyncHook, HookFuture};
use crate::error::Result;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Async operation that executes at most once across all clones
///
/// The flag flips on the first call, before the operation starts, so a second
/// call that arrives while the first is still running is already a no-op.
/// The flag belongs to this value; two guards never share state.
#[derive(Clone)]
pub struct RunOnce {
    has_run: Arc<AtomicBool>,
    op: AsyncHook,
}

impl RunOnce {
    pub fn new<F, Fut>(op: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            has_run: Arc::new(AtomicBool::new(false)),
            op: Arc::new(move || -> HookFuture { Box::pin(op()) }),
        }
    }

    /// Run the operation if nobody has yet; otherwise resolve immediately
    ///
    /// Only the first call can return an error. Later calls return `Ok(())`.
    pub async fn call(&self) -> Result<()> {
        if self.has_run.swap(true, Ordering::SeqCst) {
            debug!(target: "autoglot", "[autoglot] Already ran for this build, skipping");
            return Ok(());
        }
        (self.op)().await
    }

    pub fn has_run(&self) -> bool {
        self.has_run.load(Ordering::SeqCst)
    }

    /// The guarded operation in the shape the host's hooks expect
    pub fn hook(&self) -> AsyncHook {
        let this = self.clone();
        Arc::new(move || -> HookFuture {
            let this = this.clone();
            Box::pin(async move { this.call().await })
        })
    }
}

impl fmt::Debug for RunOnce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOnce")
            .field("has_run", &self.has_run())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutoglotError;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn counting(counter: &Arc<AtomicUsize>) -> RunOnce {
        let counter = counter.clone();
        RunOnce::new(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    #[tokio::test]
    async fn test_sequential_calls_execute_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let guard = counting(&counter);

        assert!(!guard.has_run());
        for _ in 0..5 {
            guard.call().await.unwrap();
        }

        assert!(guard.has_run());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_execute_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let slow_counter = counter.clone();
        let guard = RunOnce::new(move || {
            let counter = slow_counter.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let (a, b, c) = tokio::join!(guard.call(), guard.call(), guard.hook()());

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_flag_is_set_before_operation_completes() {
        let release = Arc::new(Notify::new());
        let counter = Arc::new(AtomicUsize::new(0));
        let (op_release, op_counter) = (release.clone(), counter.clone());
        let guard = RunOnce::new(move || {
            let release = op_release.clone();
            let counter = op_counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                release.notified().await;
                Ok(())
            }
        });

        let first = tokio::spawn({
            let guard = guard.clone();
            async move { guard.call().await }
        });
        while counter.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // The first run is still parked; a second call must not start another
        assert!(guard.has_run());
        guard.call().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        release.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_flag() {
        let counter = Arc::new(AtomicUsize::new(0));
        let guard = counting(&counter);
        let hook = guard.hook();

        hook().await.unwrap();
        guard.clone().call().await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_separate_guards_are_independent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = counting(&counter);
        let second = counting(&counter);

        first.call().await.unwrap();
        second.call().await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_only_reported_by_first_call() {
        let guard = RunOnce::new(|| async { Err(AutoglotError::Config("disk full".to_string())) });

        assert!(guard.call().await.is_err());
        assert!(guard.call().await.is_ok());
        assert!(guard.has_run());
    }
}
