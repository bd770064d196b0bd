//! Dashboard controller
//!
//! Owns the dashboard state and the request machinery around it: the
//! [`Dispatcher`] that runs backend calls as tasks, the recurring poll, and
//! the channel the tasks report back on. State is only mutated by the owner
//! of the controller, never by the request tasks.

pub mod command;
pub mod dispatcher;
pub mod poller;

use crate::backend::Backend;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::consts::cli_consts::timing::poll_interval;
use crate::events::{Event, Source};
use crate::listing::ListingQuery;
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use command::{Effect, Intent, Update};
use dispatcher::Dispatcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct DashboardController {
    dispatcher: Dispatcher,
    updates: mpsc::Receiver<Update>,
    cancel: CancellationToken,
    poller: Option<JoinHandle<()>>,
    poll_period: Duration,
    state: DashboardState,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn Backend>, query: ListingQuery, ui_config: UIConfig) -> Self {
        let (sender, updates) = mpsc::channel(EVENT_QUEUE_SIZE);
        let cancel = CancellationToken::new();
        let environment = backend.environment().clone();
        Self {
            dispatcher: Dispatcher::new(backend, sender, cancel.clone()),
            updates,
            cancel,
            poller: None,
            poll_period: poll_interval(),
            state: DashboardState::new(environment, query, ui_config),
        }
    }

    /// Performs the initial full load and starts the recurring poll.
    pub fn start(&mut self) {
        if self.poller.is_some() || self.is_disposed() {
            return;
        }
        self.state.add_to_activity_log(Event::info(
            Source::Session,
            format!("Connecting to {}", self.state.environment),
        ));
        self.run_effects(vec![Effect::Reload { manual: false }]);
        self.poller = Some(poller::spawn_poller(
            self.dispatcher.clone(),
            self.poll_period,
            self.cancel.clone(),
        ));
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    /// Carries out a user request.
    pub fn perform(&mut self, intent: Intent) {
        let effects = self.state.handle_intent(intent);
        self.run_effects(effects);
    }

    /// Applies one update from the request tasks.
    pub fn handle(&mut self, update: Update) {
        let effects = self.state.apply(update);
        self.run_effects(effects);
    }

    /// Applies every update that has already arrived, without waiting.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates.try_recv() {
            self.handle(update);
            applied += 1;
        }
        applied
    }

    /// Waits for the next update and applies it.
    pub async fn next_update(&mut self) -> bool {
        match self.updates.recv().await {
            Some(update) => {
                self.handle(update);
                true
            }
            None => false,
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        if self.cancel.is_cancelled() {
            return;
        }
        for effect in effects {
            match effect {
                Effect::Reload { manual } => {
                    self.dispatcher.load_all(self.state.query(), manual);
                }
                Effect::Dispatch(command) => {
                    self.dispatcher.dispatch(command);
                }
                Effect::Deferred { delay, commands } => {
                    self.dispatcher.dispatch_after(delay, commands);
                }
            }
        }
    }

    /// Stops the recurring poll and any pending deferred refresh.
    ///
    /// Requests already in flight run to completion; their results are dropped
    /// along with the controller.
    pub fn dispose(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        self.poller = None;
        log::debug!("Dashboard controller disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.dispose();
    }
}
