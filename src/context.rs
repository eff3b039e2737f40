//! Application context owning the notification queue

use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::notify::{self, Notification, Notifier, Presenter};

pub struct AppContext {
    notifier: Notifier,
    /// Taken by the first `start_dispatcher` call
    receiver: Mutex<Option<mpsc::Receiver<Notification>>>,
}

impl AppContext {
    pub fn new(capacity: usize) -> Self {
        let (notifier, receiver) = notify::channel(capacity);
        Self {
            notifier,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Spawn the dispatcher task. Only the first call starts one.
    pub fn start_dispatcher<P>(&self, presenter: P) -> Option<JoinHandle<()>>
    where
        P: Presenter + Send + 'static,
    {
        let receiver = self.receiver.lock().ok()?.take()?;
        Some(tokio::spawn(notify::dispatch(receiver, presenter)))
    }

    /// Close the queue and wait for queued notifications to be presented.
    ///
    /// Every [`Notifier`] handed out must be dropped first.
    pub async fn shutdown(self, dispatcher: Option<JoinHandle<()>>) {
        drop(self.notifier);
        if let Some(handle) = dispatcher {
            if let Err(err) = handle.await {
                warn!(error = %err, "Notification dispatcher failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationKind, NotificationSink};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Collecting(Arc<Mutex<Vec<NotificationKind>>>);

    impl Presenter for Collecting {
        fn present(&self, notification: &Notification) {
            self.0.lock().unwrap().push(notification.kind);
        }
    }

    #[tokio::test]
    async fn test_dispatcher_starts_once() {
        let context = AppContext::new(4);
        let first = context.start_dispatcher(Collecting::default());
        let second = context.start_dispatcher(Collecting::default());
        assert!(first.is_some());
        assert!(second.is_none());
        context.shutdown(first).await;
    }

    #[tokio::test]
    async fn test_shutdown_flushes_queue() {
        let context = AppContext::new(4);
        let presenter = Collecting::default();
        let dispatcher = context.start_dispatcher(presenter.clone());

        let notifier = context.notifier();
        notifier.notify(Notification::waiting_for_token());
        notifier.notify(Notification::timeout(5));
        drop(notifier);

        context.shutdown(dispatcher).await;
        assert_eq!(
            *presenter.0.lock().unwrap(),
            vec![NotificationKind::WaitingForToken, NotificationKind::Timeout]
        );
    }
}
