use thiserror::Error;

/// Why an incoming event was applied, partially applied, or dropped.
///
/// There is no `Result`-returning path here: per the reconciler's error
/// taxonomy, a discarded event is not a failure, it's the ordering rules
/// doing their job. Callers that want visibility log [`ReconcileOutcome`] at
/// the call site; `Diff`/`Complete` never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The event was applied: `currentNodes`/`diffNodes` were updated.
    Applied,
    /// A repeat Delete for an already-tombstoned UID; the tombstone's
    /// timestamp was refreshed but no other state changed.
    TombstoneRefreshed,
    /// A Delete for a UID with no current or previous state; a tombstone was
    /// recorded defensively but no diff entry was produced.
    DefensiveTombstone,
    /// The event was discarded without any state change.
    Discarded(DiscardReason),
}

impl ReconcileOutcome {
    /// True only for [`ReconcileOutcome::Applied`].
    pub fn is_applied(&self) -> bool {
        matches!(self, ReconcileOutcome::Applied)
    }
}

/// Why an event was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The event had no UID.
    MalformedEvent,
    /// A Delete arrived at or before an already-recorded deletion time.
    StaleDelete,
    /// A Create/Update arrived for a UID tombstoned at or after this event's
    /// time — the "out-of-order delete" case.
    LateMutationAfterDelete,
    /// A Create/Update arrived with a timestamp no newer than the last
    /// applied mutation for this UID.
    LateMutation,
    /// A Create/Update was structurally identical to the last diffed state
    /// and would only churn the downstream aggregator.
    Redundant,
}

impl DiscardReason {
    /// A short, stable tag suitable for metric label values and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscardReason::MalformedEvent => "malformed_event",
            DiscardReason::StaleDelete => "stale_delete",
            DiscardReason::LateMutationAfterDelete => "late_mutation_after_delete",
            DiscardReason::LateMutation => "late_mutation",
            DiscardReason::Redundant => "redundant",
        }
    }
}

/// Errors surfaced by a [`crate::ReconcilerHandle`] talking to a stopped
/// reconciliation loop.
///
/// This is the *only* error type a caller outside the loop ever sees — it
/// corresponds to spec ยง7's "Queue closure" case. `Diff`/`Complete` always
/// return a payload as long as the loop is still running.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// The reconciliation loop has exited; its intake is closed.
    #[error("reconciliation loop has exited")]
    LoopClosed,
}
