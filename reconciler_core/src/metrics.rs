use crate::error::{DiscardReason, ReconcileOutcome};
use metric::{Attributes, Metric, Registry, U64Counter};
use std::sync::Arc;

/// Instrumentation for a single [`crate::Reconciler`].
#[derive(Debug)]
pub struct ReconcilerMetrics {
    events_total: Arc<Metric<U64Counter>>,
    diff_calls_total: Arc<U64Counter>,
    complete_calls_total: Arc<U64Counter>,
}

impl ReconcilerMetrics {
    /// Register this reconciler's metrics in `registry`.
    pub fn new(registry: &Registry) -> Self {
        let events_total = registry.register_metric("reconciler_events_total", "events processed by outcome");
        let calls = registry.register_metric::<U64Counter>("reconciler_calls_total", "Diff/Complete invocations");
        Self {
            diff_calls_total: calls.recorder(Attributes::from([("call", "diff")])),
            complete_calls_total: calls.recorder(Attributes::from([("call", "complete")])),
            events_total,
        }
    }

    pub(crate) fn record_outcome(&self, outcome: ReconcileOutcome) {
        let label = match outcome {
            ReconcileOutcome::Applied => "applied",
            ReconcileOutcome::TombstoneRefreshed => "tombstone_refreshed",
            ReconcileOutcome::DefensiveTombstone => "defensive_tombstone",
            ReconcileOutcome::Discarded(reason) => reason_label(reason),
        };
        self.events_total.recorder(Attributes::from([("outcome", label)])).inc(1);
    }

    pub(crate) fn record_diff(&self) {
        self.diff_calls_total.inc(1);
    }

    pub(crate) fn record_complete(&self) {
        self.complete_calls_total.inc(1);
    }
}

fn reason_label(reason: DiscardReason) -> &'static str {
    match reason {
        DiscardReason::MalformedEvent => "discarded_malformed_event",
        DiscardReason::StaleDelete => "discarded_stale_delete",
        DiscardReason::LateMutationAfterDelete => "discarded_late_mutation_after_delete",
        DiscardReason::LateMutation => "discarded_late_mutation",
        DiscardReason::Redundant => "discarded_redundant",
    }
}
