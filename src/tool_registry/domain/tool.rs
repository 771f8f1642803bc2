//! Tool aggregate root and its lifecycle status.

use super::{ParseToolStatusError, ToolDescription, ToolId, ToolName, ToolRegistryDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a registered tool.
///
/// Progression is strictly linear:
/// `draft -> tested -> published -> promotion-requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolStatus {
    /// Tool has been registered but not yet tested.
    Draft,
    /// Tool passed a playground test run.
    Tested,
    /// Tool is published to the playground catalog.
    Published,
    /// Promotion beyond the playground has been requested.
    PromotionRequested,
}

impl ToolStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Tested => "tested",
            Self::Published => "published",
            Self::PromotionRequested => "promotion-requested",
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Tested)
                | (Self::Tested, Self::Published)
                | (Self::Published, Self::PromotionRequested)
        )
    }

    /// Returns whether no further transition exists from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PromotionRequested)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolStatus {
    type Error = ParseToolStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "tested" => Ok(Self::Tested),
            "published" => Ok(Self::Published),
            "promotion-requested" => Ok(Self::PromotionRequested),
            _ => Err(ParseToolStatusError(value.to_owned())),
        }
    }
}

/// Registered tool aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    id: ToolId,
    name: ToolName,
    description: ToolDescription,
    status: ToolStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a tool from stored or seeded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedToolData {
    /// Stored tool identifier.
    pub id: ToolId,
    /// Stored tool name.
    pub name: ToolName,
    /// Stored tool description.
    pub description: ToolDescription,
    /// Stored lifecycle status.
    pub status: ToolStatus,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    /// Creates a new tool in [`ToolStatus::Draft`].
    #[must_use]
    pub fn new(name: ToolName, description: ToolDescription, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ToolId::new(),
            name,
            description,
            status: ToolStatus::Draft,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a tool from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedToolData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tool identifier.
    #[must_use]
    pub const fn id(&self) -> ToolId {
        self.id
    }

    /// Returns the tool name.
    #[must_use]
    pub const fn name(&self) -> &ToolName {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub const fn description(&self) -> &ToolDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ToolStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest status change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Validates that the tool may move to `target` without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::InvalidStatusTransition`] when the
    /// transition is not allowed.
    pub fn ensure_can_transition_to(
        &self,
        target: ToolStatus,
    ) -> Result<(), ToolRegistryDomainError> {
        if self.status.can_transition_to(target) {
            return Ok(());
        }

        Err(ToolRegistryDomainError::InvalidStatusTransition {
            tool_id: self.id,
            from: self.status.as_str().to_owned(),
            to: target.as_str().to_owned(),
        })
    }

    /// Records a successful test run.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::InvalidStatusTransition`] unless the
    /// tool is in `draft`.
    pub fn mark_tested(&mut self, clock: &impl Clock) -> Result<(), ToolRegistryDomainError> {
        self.transition_to(ToolStatus::Tested, clock)
    }

    /// Publishes a tested tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::InvalidStatusTransition`] unless the
    /// tool is in `tested`.
    pub fn publish(&mut self, clock: &impl Clock) -> Result<(), ToolRegistryDomainError> {
        self.transition_to(ToolStatus::Published, clock)
    }

    /// Requests promotion of a published tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::InvalidStatusTransition`] unless the
    /// tool is in `published`.
    pub fn request_promotion(&mut self, clock: &impl Clock) -> Result<(), ToolRegistryDomainError> {
        self.transition_to(ToolStatus::PromotionRequested, clock)
    }

    fn transition_to(
        &mut self,
        target: ToolStatus,
        clock: &impl Clock,
    ) -> Result<(), ToolRegistryDomainError> {
        self.ensure_can_transition_to(target)?;
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
