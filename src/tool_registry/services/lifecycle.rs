//! Service layer for tool registration and lifecycle orchestration.

use super::{
    ToolRegistryConfig, ToolRegistryServiceError, ToolRegistryServiceResult,
    pending::{CancelReason, PendingTests},
};
use crate::tool_registry::{
    domain::{
        PersistedToolData, PlaygroundServer, Tool, ToolDescription, ToolId, ToolName, ToolStatus,
    },
    ports::ToolRepository,
};
use mockable::Clock;
use std::sync::{Arc, RwLock};
use tokio::sync::oneshot;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Request payload for registering a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterToolRequest {
    /// Tool name; trimmed and required.
    pub name: String,
    /// Tool description; trimmed and required.
    pub description: String,
}

impl RegisterToolRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// How a scheduled test run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolTestOutcome {
    /// The tool was marked tested.
    Completed(Tool),
    /// A later run for the same tool replaced this one.
    Superseded,
    /// The run was cancelled before its delay elapsed.
    Cancelled,
    /// The delay elapsed but the tool could not be marked tested.
    Failed(String),
}

impl ToolTestOutcome {
    /// Returns whether the run marked the tool tested.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl From<CancelReason> for ToolTestOutcome {
    fn from(reason: CancelReason) -> Self {
        match reason {
            CancelReason::Superseded => Self::Superseded,
            CancelReason::Cancelled => Self::Cancelled,
        }
    }
}

/// Handle to a scheduled test run.
///
/// Dropping the handle does not cancel the run.
#[derive(Debug)]
pub struct PendingToolTest {
    tool_id: ToolId,
    outcome: oneshot::Receiver<ToolTestOutcome>,
}

impl PendingToolTest {
    /// Returns the identifier of the tool under test.
    #[must_use]
    pub const fn tool_id(&self) -> ToolId {
        self.tool_id
    }

    /// Waits for the run to resolve.
    pub async fn outcome(self) -> ToolTestOutcome {
        self.outcome.await.unwrap_or(ToolTestOutcome::Cancelled)
    }
}

/// Deferred `draft -> tested` transition owned by a spawned task.
struct TestCompletion<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
    pending: PendingTests,
    tool_id: ToolId,
    generation: u64,
}

impl<R, C> TestCompletion<R, C>
where
    R: ToolRepository,
    C: Clock + Send + Sync,
{
    async fn run(
        self,
        deadline: Instant,
        mut cancel: oneshot::Receiver<CancelReason>,
        outcome_tx: oneshot::Sender<ToolTestOutcome>,
    ) {
        let tool_id = self.tool_id;
        let interrupted = tokio::select! {
            reason = &mut cancel => Some(reason),
            () = sleep_until(deadline) => None,
        };
        let outcome = match interrupted {
            Some(reason) => reason.map_or(ToolTestOutcome::Cancelled, ToolTestOutcome::from),
            None => self.complete(cancel).await,
        };

        if outcome_tx.send(outcome).is_err() {
            debug!(tool_id = %tool_id, "test run handle dropped before completion");
        }
    }

    /// Writes `tested` before clearing the pending marker.
    async fn complete(self, mut cancel: oneshot::Receiver<CancelReason>) -> ToolTestOutcome {
        match self.pending.is_current(self.tool_id, self.generation) {
            Ok(true) => {}
            // Interrupted after the deadline fired but before this task ran.
            Ok(false) => {
                return cancel
                    .try_recv()
                    .map_or(ToolTestOutcome::Superseded, ToolTestOutcome::from);
            }
            Err(err) => return self.fail(&err),
        }

        let outcome = match self.mark_tested().await {
            Ok(tool) => {
                info!(tool_id = %tool.id(), status = %tool.status(), "tool test run completed");
                ToolTestOutcome::Completed(tool)
            }
            Err(err) => self.fail(&err),
        };

        if let Err(err) = self.pending.finish(self.tool_id, self.generation) {
            warn!(tool_id = %self.tool_id, error = %err, "failed to clear pending test marker");
        }
        outcome
    }

    async fn mark_tested(&self) -> ToolRegistryServiceResult<Tool> {
        let mut tool = self
            .repository
            .find_by_id(self.tool_id)
            .await?
            .ok_or(ToolRegistryServiceError::NotFound(self.tool_id))?;
        tool.mark_tested(&*self.clock)?;
        self.repository.update(&tool).await?;
        Ok(tool)
    }

    fn fail(&self, err: &ToolRegistryServiceError) -> ToolTestOutcome {
        warn!(tool_id = %self.tool_id, error = %err, "tool test run failed");
        ToolTestOutcome::Failed(err.to_string())
    }
}

/// Tool registration and lifecycle orchestration service.
#[derive(Clone)]
pub struct ToolRegistryService<R, C>
where
    R: ToolRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: Arc<ToolRegistryConfig>,
    pending: PendingTests,
    playground: Arc<RwLock<PlaygroundServer>>,
}

impl<R, C> ToolRegistryService<R, C>
where
    R: ToolRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, ToolRegistryConfig::default())
    }

    /// Creates a service with an explicit configuration.
    #[must_use]
    pub fn with_config(repository: Arc<R>, clock: Arc<C>, config: ToolRegistryConfig) -> Self {
        let playground = Arc::new(RwLock::new(config.default_playground));
        Self {
            repository,
            clock,
            config: Arc::new(config),
            pending: PendingTests::default(),
            playground,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ToolRegistryConfig {
        &self.config
    }

    async fn find_tool_or_error(&self, tool_id: ToolId) -> ToolRegistryServiceResult<Tool> {
        self.repository
            .find_by_id(tool_id)
            .await?
            .ok_or(ToolRegistryServiceError::NotFound(tool_id))
    }

    /// Registers a new tool in `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::Domain`] when the name or
    /// description is blank, or repository errors when storage fails.
    pub async fn register(&self, request: RegisterToolRequest) -> ToolRegistryServiceResult<Tool> {
        let name = ToolName::new(request.name)?;
        let description = ToolDescription::new(request.description)?;
        let tool = Tool::new(name, description, &*self.clock);
        self.repository.store(&tool).await?;
        info!(tool_id = %tool.id(), name = %tool.name(), "registered tool");
        Ok(tool)
    }

    /// Stores the tools listed in [`ToolRegistryConfig::initial_tools`].
    ///
    /// Every entry is validated before any is stored. Seeding only runs
    /// against an empty registry; otherwise nothing is stored and an empty
    /// list is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::Domain`] when a seed entry has a
    /// blank name or description, or repository errors when storage fails.
    pub async fn seed_initial_tools(&self) -> ToolRegistryServiceResult<Vec<Tool>> {
        if !self.repository.list_all().await?.is_empty() {
            debug!("registry already populated, skipping seed");
            return Ok(Vec::new());
        }

        let timestamp = self.clock.utc();
        let seeded = self
            .config
            .initial_tools
            .iter()
            .map(|seed| -> ToolRegistryServiceResult<Tool> {
                Ok(Tool::from_persisted(PersistedToolData {
                    id: ToolId::new(),
                    name: ToolName::new(seed.name.as_str())?,
                    description: ToolDescription::new(seed.description.as_str())?,
                    status: seed.status,
                    created_at: timestamp,
                    updated_at: timestamp,
                }))
            })
            .collect::<ToolRegistryServiceResult<Vec<_>>>()?;

        for tool in &seeded {
            self.repository.store(tool).await?;
            debug!(tool_id = %tool.id(), status = %tool.status(), "seeded tool");
        }
        info!(count = seeded.len(), "seeded initial tools");
        Ok(seeded)
    }

    /// Lists all tools in registration order.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_all(&self) -> ToolRegistryServiceResult<Vec<Tool>> {
        Ok(self.repository.list_all().await?)
    }

    /// Finds a tool by identifier.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn find_by_id(&self, tool_id: ToolId) -> ToolRegistryServiceResult<Option<Tool>> {
        Ok(self.repository.find_by_id(tool_id).await?)
    }

    /// Schedules a test run that marks a draft tool tested once the
    /// configured delay elapses.
    ///
    /// The tool's pending marker is set until the run resolves and is only
    /// cleared after `tested` has been written. Calling this again for a tool
    /// with a pending run supersedes the earlier run and restarts the delay.
    /// Cancelling or superseding a run whose write has already started does
    /// not undo the write.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::NotFound`] when no tool has the
    /// given ID, [`ToolRegistryServiceError::Domain`] when the tool is not in
    /// `draft`, or repository errors.
    pub async fn test_tool(&self, tool_id: ToolId) -> ToolRegistryServiceResult<PendingToolTest> {
        let tool = self.find_tool_or_error(tool_id).await?;
        tool.ensure_can_transition_to(ToolStatus::Tested)?;

        let deadline = Instant::now() + self.config.test_delay();
        let registration = self.pending.begin(tool_id)?;
        if registration.superseded {
            debug!(tool_id = %tool_id, "superseded pending test run");
        }

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let completion = TestCompletion {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            pending: self.pending.clone(),
            tool_id,
            generation: registration.generation,
        };
        tokio::spawn(completion.run(deadline, registration.cancel, outcome_tx));
        debug!(
            tool_id = %tool_id,
            delay_ms = self.config.test_delay_ms,
            "scheduled test run"
        );

        Ok(PendingToolTest {
            tool_id,
            outcome: outcome_rx,
        })
    }

    /// Cancels the pending test run for a tool.
    ///
    /// Returns whether a run was pending. The tool keeps its status.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::StatePoisoned`] when pending state
    /// is unavailable.
    pub fn cancel_test(&self, tool_id: ToolId) -> ToolRegistryServiceResult<bool> {
        let cancelled = self.pending.cancel(tool_id)?;
        if cancelled {
            debug!(tool_id = %tool_id, "cancelled pending test run");
        }
        Ok(cancelled)
    }

    /// Returns whether a test run is pending for the tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::StatePoisoned`] when pending state
    /// is unavailable.
    pub fn is_pending(&self, tool_id: ToolId) -> ToolRegistryServiceResult<bool> {
        self.pending.contains(tool_id)
    }

    /// Returns the tools with pending test runs, oldest run first.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::StatePoisoned`] when pending state
    /// is unavailable.
    pub fn pending_tool_ids(&self) -> ToolRegistryServiceResult<Vec<ToolId>> {
        self.pending.tool_ids()
    }

    /// Publishes a tested tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::NotFound`] when no tool has the
    /// given ID, [`ToolRegistryServiceError::Domain`] when the tool is not in
    /// `tested`, or repository errors.
    pub async fn publish(&self, tool_id: ToolId) -> ToolRegistryServiceResult<Tool> {
        let mut tool = self.find_tool_or_error(tool_id).await?;
        tool.publish(&*self.clock)?;
        self.repository.update(&tool).await?;
        info!(tool_id = %tool_id, status = %tool.status(), "published tool");
        Ok(tool)
    }

    /// Requests promotion of a published tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::NotFound`] when no tool has the
    /// given ID, [`ToolRegistryServiceError::Domain`] when the tool is not in
    /// `published`, or repository errors.
    pub async fn request_promotion(&self, tool_id: ToolId) -> ToolRegistryServiceResult<Tool> {
        let mut tool = self.find_tool_or_error(tool_id).await?;
        tool.request_promotion(&*self.clock)?;
        self.repository.update(&tool).await?;
        info!(tool_id = %tool_id, status = %tool.status(), "requested tool promotion");
        Ok(tool)
    }

    /// Records the playground server selection.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::StatePoisoned`] when the selection
    /// lock is poisoned.
    pub fn select_playground(&self, server: PlaygroundServer) -> ToolRegistryServiceResult<()> {
        let mut selected = self
            .playground
            .write()
            .map_err(|err| ToolRegistryServiceError::StatePoisoned(err.to_string()))?;
        *selected = server;
        debug!(playground = %server, "selected playground server");
        Ok(())
    }

    /// Returns the selected playground server.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryServiceError::StatePoisoned`] when the selection
    /// lock is poisoned.
    pub fn selected_playground(&self) -> ToolRegistryServiceResult<PlaygroundServer> {
        self.playground
            .read()
            .map(|selected| *selected)
            .map_err(|err| ToolRegistryServiceError::StatePoisoned(err.to_string()))
    }
}
