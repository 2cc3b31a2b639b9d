use crate::config::ReconcilerConfig;
use crate::error::{ReconcileOutcome, SubmitError};
use crate::payload::{Diff, Snapshot};
use crate::reconciler::Reconciler;
use graph_types::NodeEvent;
use metric::Registry;
use observability_deps::tracing::info;
use recon_time::{SystemProvider, TimeProvider};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A request handed to the [`ReconcilerActor`] over its command channel.
enum Command {
    Apply(NodeEvent, oneshot::Sender<ReconcileOutcome>),
    Diff(oneshot::Sender<Diff>),
    Complete(oneshot::Sender<Snapshot>),
}

/// The single task that owns a [`Reconciler`] and drains its command
/// channel one message at a time.
///
/// This is the entirety of the concurrency model described in spec ยง5:
/// everyone who wants to mutate or query reconciler state goes through this
/// one channel, so the `Reconciler` itself never needs interior mutability.
pub struct ReconcilerActor {
    reconciler: Reconciler,
    commands: mpsc::Receiver<Command>,
    time_provider: Arc<dyn TimeProvider>,
}

impl ReconcilerActor {
    /// Spawn a new actor and return a handle to it. The caller is
    /// responsible for driving the returned actor with [`ReconcilerActor::run`]
    /// (typically via `tokio::spawn`).
    pub fn new(config: ReconcilerConfig, registry: &Registry, channel_capacity: usize) -> (Self, ReconcilerHandle) {
        let (tx, rx) = mpsc::channel(channel_capacity);
        let actor = Self {
            reconciler: Reconciler::new(config, registry),
            commands: rx,
            time_provider: Arc::new(SystemProvider::new()),
        };
        (actor, ReconcilerHandle { commands: tx })
    }

    /// Drain the command channel until every handle is dropped. Runs until
    /// the channel closes; does not return an error, since a closed channel
    /// is the ordinary way this loop ends.
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Apply(event, reply) => {
                    let outcome = self.reconciler.apply_event(event);
                    let _ = reply.send(outcome);
                }
                Command::Diff(reply) => {
                    let diff = self.reconciler.diff();
                    let _ = reply.send(diff);
                }
                Command::Complete(reply) => {
                    let snapshot = self.reconciler.complete();
                    let _ = reply.send(snapshot);
                }
            }
        }
        let now = self.time_provider.now();
        info!(%now, "reconciler loop exiting: intake closed");
    }
}

/// A cheaply cloneable handle to a running [`ReconcilerActor`].
///
/// Every method round-trips through the actor's single consumer task, so
/// events, `Diff`, and `Complete` calls from any number of callers are
/// strictly serialized in the order they're sent.
#[derive(Debug, Clone)]
pub struct ReconcilerHandle {
    commands: mpsc::Sender<Command>,
}

impl ReconcilerHandle {
    /// Submit one event for reconciliation and await its outcome.
    ///
    /// Backpressure: if the actor's intake is full, this await simply waits
    /// — there is no separate bounded queue to overflow (spec ยง4.C).
    pub async fn submit(&self, event: NodeEvent) -> Result<ReconcileOutcome, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Apply(event, reply_tx))
            .await
            .map_err(|_| SubmitError::LoopClosed)?;
        reply_rx.await.map_err(|_| SubmitError::LoopClosed)
    }

    /// Request the change set since the last `Diff`/`Complete` call.
    pub async fn diff(&self) -> Result<Diff, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Diff(reply_tx))
            .await
            .map_err(|_| SubmitError::LoopClosed)?;
        reply_rx.await.map_err(|_| SubmitError::LoopClosed)
    }

    /// Request a full snapshot of the current graph state.
    pub async fn complete(&self) -> Result<Snapshot, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Complete(reply_tx))
            .await
            .map_err(|_| SubmitError::LoopClosed)?;
        reply_rx.await.map_err(|_| SubmitError::LoopClosed)
    }
}
