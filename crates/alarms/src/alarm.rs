//! The triggered-alarm record handed over by the inventory collector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vcheck_core::{ManagedObjectRef, Severity, StatusColor};

use crate::classification::{Classification, FilterStage, StageOutcome};

/// The defined alarm that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRef {
    pub reference: ManagedObjectRef,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The inventory object the alarm fired against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub reference: ManagedObjectRef,
    pub name: String,
}

/// One live instance of a defined alarm firing against an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredAlarm {
    /// Unique alarm state key, e.g. `alarm-12.datastore-1021`.
    pub key: String,
    pub alarm: AlarmRef,
    pub entity: EntityRef,
    #[serde(default)]
    pub datacenter: String,
    /// Pools the entity belongs to: none, its own, and possibly its parent.
    #[serde(default)]
    pub resource_pools: Vec<String>,
    pub status: StatusColor,
    pub triggered_at: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub acknowledged_by: Option<String>,
    /// Set by the filter pipeline; absent in fresh collector data.
    #[serde(default)]
    pub classification: Classification,
}

impl TriggeredAlarm {
    /// Build an unacknowledged, unclassified record.
    pub fn new(
        key: impl Into<String>,
        alarm: AlarmRef,
        entity: EntityRef,
        status: StatusColor,
        triggered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            alarm,
            entity,
            datacenter: String::new(),
            resource_pools: Vec::new(),
            status,
            triggered_at,
            acknowledged: false,
            acknowledged_at: None,
            acknowledged_by: None,
            classification: Classification::Undecided,
        }
    }

    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = datacenter.into();
        self
    }

    pub fn with_resource_pools<I, S>(mut self, pools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_pools = pools.into_iter().map(Into::into).collect();
        self
    }

    pub fn acknowledge(mut self, user: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.acknowledged = true;
        self.acknowledged_by = Some(user.into());
        self.acknowledged_at = Some(at);
        self
    }

    /// Entity type keyword, taken from the entity's managed object type.
    pub fn entity_type(&self) -> &str {
        &self.entity.reference.kind
    }

    pub fn severity(&self) -> Severity {
        self.status.severity()
    }

    pub fn is_excluded(&self) -> bool {
        self.classification.is_excluded()
    }

    pub fn is_explicitly_included(&self) -> bool {
        self.classification.is_explicitly_included()
    }

    pub fn is_explicitly_excluded(&self) -> bool {
        self.classification.is_explicitly_excluded()
    }

    pub fn exclude_reason(&self) -> Option<FilterStage> {
        self.classification.exclude_reason()
    }

    /// Apply a stage outcome, returning the state before and after.
    pub(crate) fn classify(
        &mut self,
        stage: FilterStage,
        outcome: StageOutcome,
    ) -> (Classification, Classification) {
        let before = self.classification;
        self.classification = before.apply(stage, outcome);
        (before, self.classification)
    }
}
