use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// One-shot welcome screen timer.
///
/// Visible from `start` until `duration` elapses. Cancelling (or dropping)
/// the splash stops the pending timer and hides it immediately.
#[derive(Debug)]
pub struct Splash {
    visible: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl Splash {
    /// Start the timer. Must be called from inside a tokio runtime.
    pub fn start(duration: Duration) -> Self {
        if duration.is_zero() {
            return Self::hidden();
        }

        let visible = Arc::new(AtomicBool::new(true));
        let cancel = CancellationToken::new();

        let flag = Arc::clone(&visible);
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {
                    flag.store(false, Ordering::Release);
                    tracing::debug!("splash finished");
                }
                _ = token.cancelled() => {}
            }
        });

        Self { visible, cancel }
    }

    /// A splash that never shows.
    pub fn hidden() -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(false)),
            cancel: CancellationToken::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
        self.visible.store(false, Ordering::Release);
    }
}

impl Drop for Splash {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hides_after_duration() {
        let splash = Splash::start(Duration::from_millis(2500));
        assert!(splash.is_visible());

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert!(splash.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!splash.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_hides_immediately() {
        let splash = Splash::start(Duration::from_secs(10));
        splash.cancel();
        assert!(!splash.is_visible());

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(!splash.is_visible());
    }

    #[test]
    fn hidden_is_never_visible() {
        assert!(!Splash::hidden().is_visible());
    }

    #[tokio::test]
    async fn zero_duration_is_hidden() {
        assert!(!Splash::start(Duration::ZERO).is_visible());
    }
}
