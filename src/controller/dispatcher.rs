//! Runs backend requests as tasks and reports their results over a channel.

use super::command::{Command, Outcome, Response, Update};
use crate::backend::Backend;
use crate::listing::ListingQuery;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Issues requests against the backend. Cheap to clone; all clones share one
/// sequence counter, so sequence numbers increase in the order requests start.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    updates: mpsc::Sender<Update>,
    sequence: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        updates: mpsc::Sender<Update>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            backend,
            updates,
            sequence: Arc::new(AtomicU64::new(0)),
            cancel,
        }
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Performs one request in the current task.
    pub async fn execute(&self, command: Command) -> Response {
        let seq = self.next_seq();
        let backend = &self.backend;
        let outcome = match command {
            Command::LoadStats => Outcome::Stats(backend.get_stats().await),
            Command::LoadListings(query) => {
                Outcome::Listings(query, backend.get_listings(query).await)
            }
            Command::LoadDetail(id) => Outcome::Detail(id, backend.get_listing(id).await),
            Command::CheckHealth => Outcome::Health(backend.get_health().await),
            Command::Reprocess(id) => Outcome::Reprocessed(id, backend.reprocess(id).await),
            Command::ControlSystem(action) => {
                Outcome::SystemControlled(action, backend.control_system(action).await)
            }
        };
        Response { seq, outcome }
    }

    async fn send(&self, update: Update) {
        // The receiver is gone only after teardown.
        let _ = self.updates.send(update).await;
    }

    /// Spawns a task running one request.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let response = dispatcher.execute(command).await;
            dispatcher.send(Update::Response(response)).await;
        })
    }

    /// Spawns the given requests after `delay`, unless the dashboard is torn down first.
    pub fn dispatch_after(&self, delay: Duration, commands: Vec<Command>) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = dispatcher.cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    for command in commands {
                        dispatcher.dispatch(command);
                    }
                }
            }
        })
    }

    /// Loads stats, then listings, then health, one after another.
    ///
    /// Each step reports its own result; a failing step does not stop the next.
    pub fn load_all(&self, query: ListingQuery, manual: bool) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher.send(Update::LoadingStarted).await;
            for command in [
                Command::LoadStats,
                Command::LoadListings(query),
                Command::CheckHealth,
            ] {
                let response = dispatcher.execute(command).await;
                dispatcher.send(Update::Response(response)).await;
            }
            dispatcher.send(Update::LoadingFinished { manual }).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::backend::error::BackendError;
    use crate::controller::command::RequestKind;
    use crate::listing::{ListingsPage, SystemHealth, SystemStats};

    fn http_error(status: u16) -> BackendError {
        BackendError::Http {
            status,
            message: String::new(),
        }
    }

    #[tokio::test]
    /// A failing first step must not stop the remaining steps of a full load.
    async fn load_all_runs_every_step_in_order() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_stats()
            .times(1)
            .returning(|| Err(http_error(500)));
        backend
            .expect_get_listings()
            .times(1)
            .returning(|_| Ok(ListingsPage::default()));
        backend
            .expect_get_health()
            .times(1)
            .returning(|| Ok(SystemHealth::default()));

        let (tx, mut rx) = mpsc::channel(16);
        let dispatcher = Dispatcher::new(Arc::new(backend), tx, CancellationToken::new());
        dispatcher
            .load_all(ListingQuery::default(), false)
            .await
            .unwrap();

        assert!(matches!(rx.recv().await, Some(Update::LoadingStarted)));
        let mut kinds = Vec::new();
        let mut seqs = Vec::new();
        for _ in 0..3 {
            match rx.recv().await {
                Some(Update::Response(response)) => {
                    kinds.push(response.outcome.kind());
                    seqs.push(response.seq);
                }
                other => panic!("unexpected update: {:?}", other),
            }
        }
        assert_eq!(
            kinds,
            vec![RequestKind::Stats, RequestKind::Listings, RequestKind::Health]
        );
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
        assert!(matches!(
            rx.recv().await,
            Some(Update::LoadingFinished { manual: false })
        ));
    }

    #[tokio::test]
    /// Deferred requests are dropped when the dashboard is torn down first.
    async fn dispatch_after_respects_cancellation() {
        let mut backend = MockBackend::new();
        backend.expect_get_stats().never();

        let (tx, mut rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let dispatcher = Dispatcher::new(Arc::new(backend), tx, cancel.clone());

        let handle = dispatcher.dispatch_after(Duration::from_secs(60), vec![Command::LoadStats]);
        cancel.cancel();
        handle.await.unwrap();
        drop(dispatcher);

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn dispatch_reports_stats() {
        let mut backend = MockBackend::new();
        backend.expect_get_stats().returning(|| {
            Ok(SystemStats {
                total_properties: Some(3),
                ..SystemStats::default()
            })
        });

        let (tx, mut rx) = mpsc::channel(4);
        let dispatcher = Dispatcher::new(Arc::new(backend), tx, CancellationToken::new());
        dispatcher.dispatch(Command::LoadStats).await.unwrap();

        match rx.recv().await {
            Some(Update::Response(Response {
                outcome: Outcome::Stats(Ok(stats)),
                ..
            })) => assert_eq!(stats.total(), 3),
            other => panic!("unexpected update: {:?}", other),
        }
    }
}
