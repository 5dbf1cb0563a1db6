//! Include/exclude filter options for the triggered-alarm pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::FilterStage;
use crate::error::{AlarmError, Result};

/// Operator-supplied filter options.
///
/// Every field is optional and defaults to "no restriction". For each
/// dimension at most one of the include/exclude lists may be set; see
/// [`FilterOptions::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    pub included_entity_types: Vec<String>,
    pub excluded_entity_types: Vec<String>,
    pub included_entity_names: Vec<String>,
    pub excluded_entity_names: Vec<String>,
    pub included_resource_pools: Vec<String>,
    pub excluded_resource_pools: Vec<String>,
    pub included_alarm_names: Vec<String>,
    pub excluded_alarm_names: Vec<String>,
    pub included_alarm_descriptions: Vec<String>,
    pub excluded_alarm_descriptions: Vec<String>,
    pub included_alarm_statuses: Vec<String>,
    pub excluded_alarm_statuses: Vec<String>,
    /// Keep acknowledged alarms in the evaluation instead of excluding them.
    pub evaluate_acknowledged_alarms: bool,
}

impl FilterOptions {
    /// Parse options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_yaml::from_str(yaml)?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading filter options");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Include and exclude lists for a stage. The acknowledgment stage has
    /// no lists and yields two empty slices.
    pub fn lists(&self, stage: FilterStage) -> (&[String], &[String]) {
        let (include, exclude) = match stage {
            FilterStage::Acknowledged => return (&[], &[]),
            FilterStage::EntityType => (&self.included_entity_types, &self.excluded_entity_types),
            FilterStage::AlarmName => (&self.included_alarm_names, &self.excluded_alarm_names),
            FilterStage::AlarmDescription => (
                &self.included_alarm_descriptions,
                &self.excluded_alarm_descriptions,
            ),
            FilterStage::Status => (&self.included_alarm_statuses, &self.excluded_alarm_statuses),
            FilterStage::EntityName => (&self.included_entity_names, &self.excluded_entity_names),
            FilterStage::ResourcePool => (
                &self.included_resource_pools,
                &self.excluded_resource_pools,
            ),
        };
        (include.as_slice(), exclude.as_slice())
    }

    /// Reject options that set both lists for one dimension.
    pub fn validate(&self) -> Result<()> {
        for stage in FilterStage::ORDER {
            let (include, exclude) = self.lists(stage);
            if !include.is_empty() && !exclude.is_empty() {
                return Err(AlarmError::ConflictingFilters { dimension: stage });
            }
        }
        Ok(())
    }

    /// True when no list is set and acknowledged alarms are evaluated.
    pub fn is_unrestricted(&self) -> bool {
        self.evaluate_acknowledged_alarms
            && FilterStage::ORDER.iter().all(|stage| {
                let (include, exclude) = self.lists(*stage);
                include.is_empty() && exclude.is_empty()
            })
    }
}
