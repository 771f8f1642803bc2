//! Per-tool tracking of in-flight test runs.

use super::{ToolRegistryServiceError, ToolRegistryServiceResult};
use crate::tool_registry::domain::ToolId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::debug;

/// Why a pending run stopped before its timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CancelReason {
    /// A newer run for the same tool replaced this one.
    Superseded,
    /// The run was cancelled explicitly.
    Cancelled,
}

#[derive(Debug)]
struct PendingEntry {
    generation: u64,
    cancel: oneshot::Sender<CancelReason>,
}

#[derive(Debug, Default)]
struct PendingState {
    next_generation: u64,
    entries: HashMap<ToolId, PendingEntry>,
}

/// Registration returned when a run is recorded as pending.
#[derive(Debug)]
pub(crate) struct PendingRegistration {
    /// Generation of the new run; completions from older generations are
    /// ignored.
    pub(crate) generation: u64,
    /// Fires when the run is superseded or cancelled.
    pub(crate) cancel: oneshot::Receiver<CancelReason>,
    /// Whether an earlier run for the same tool was replaced.
    pub(crate) superseded: bool,
}

/// Pending markers keyed by tool.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingTests {
    state: Arc<Mutex<PendingState>>,
}

fn signal(tool_id: ToolId, entry: PendingEntry, reason: CancelReason) {
    // The receiver is gone once the run has already resolved.
    if entry.cancel.send(reason).is_err() {
        debug!(tool_id = %tool_id, ?reason, "pending test run already finished");
    }
}

impl PendingTests {
    fn lock(&self) -> ToolRegistryServiceResult<MutexGuard<'_, PendingState>> {
        self.state
            .lock()
            .map_err(|err| ToolRegistryServiceError::StatePoisoned(err.to_string()))
    }

    /// Records a new pending run, superseding any earlier one for the tool.
    pub(crate) fn begin(&self, tool_id: ToolId) -> ToolRegistryServiceResult<PendingRegistration> {
        let mut state = self.lock()?;
        state.next_generation = state.next_generation.wrapping_add(1);
        let generation = state.next_generation;
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let previous = state.entries.insert(
            tool_id,
            PendingEntry {
                generation,
                cancel: cancel_tx,
            },
        );
        let superseded = previous.is_some();
        if let Some(entry) = previous {
            signal(tool_id, entry, CancelReason::Superseded);
        }

        Ok(PendingRegistration {
            generation,
            cancel: cancel_rx,
            superseded,
        })
    }

    /// Returns whether `generation` still owns the tool's marker.
    pub(crate) fn is_current(&self, tool_id: ToolId, generation: u64) -> ToolRegistryServiceResult<bool> {
        Ok(self
            .lock()?
            .entries
            .get(&tool_id)
            .is_some_and(|entry| entry.generation == generation))
    }

    /// Removes the marker if `generation` is still the current run.
    ///
    /// Returns `false` when a newer run owns the marker.
    pub(crate) fn finish(&self, tool_id: ToolId, generation: u64) -> ToolRegistryServiceResult<bool> {
        let mut state = self.lock()?;
        let is_current = state
            .entries
            .get(&tool_id)
            .is_some_and(|entry| entry.generation == generation);
        if is_current {
            state.entries.remove(&tool_id);
        }
        Ok(is_current)
    }

    /// Cancels the pending run for a tool, if any.
    ///
    /// The run is signalled before the lock is released.
    pub(crate) fn cancel(&self, tool_id: ToolId) -> ToolRegistryServiceResult<bool> {
        let mut state = self.lock()?;
        let Some(entry) = state.entries.remove(&tool_id) else {
            return Ok(false);
        };
        signal(tool_id, entry, CancelReason::Cancelled);
        Ok(true)
    }

    /// Returns whether a run is pending for the tool.
    pub(crate) fn contains(&self, tool_id: ToolId) -> ToolRegistryServiceResult<bool> {
        Ok(self.lock()?.entries.contains_key(&tool_id))
    }

    /// Returns the tools with pending runs, oldest run first.
    pub(crate) fn tool_ids(&self) -> ToolRegistryServiceResult<Vec<ToolId>> {
        let state = self.lock()?;
        let mut pending: Vec<(u64, ToolId)> = state
            .entries
            .iter()
            .map(|(tool_id, entry)| (entry.generation, *tool_id))
            .collect();
        pending.sort_unstable_by_key(|(generation, _)| *generation);
        Ok(pending.into_iter().map(|(_, tool_id)| tool_id).collect())
    }
}
