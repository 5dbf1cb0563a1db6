//! Fixed-order filter pipeline over a triggered-alarm collection.
//!
//! Stages run in [`FilterStage::ORDER`]:
//! acknowledgment state, entity type, alarm name, alarm description,
//! status, entity name, resource pool. Each stage only sees the
//! classification left behind by the stages before it.

mod matching;
mod stages;


use std::sync::Arc;

use tracing::debug;

use crate::alarm::TriggeredAlarm;
use crate::classification::FilterStage;
use crate::collection::TriggeredAlarms;
use crate::error::Result;
use crate::observer::{FilterObserver, TracingObserver};
use crate::options::FilterOptions;

pub use matching::TextField;
pub use stages::{
    filter_by_acknowledged_state, filter_by_entity_type, filter_by_field_keyword,
    filter_by_resource_pool, filter_by_status, filter_by_text,
};

/// Validated filter options plus the observer that audits each decision.
pub struct FilterPipeline {
    options: FilterOptions,
    observer: Arc<dyn FilterObserver>,
}

impl FilterPipeline {
    /// Build a pipeline that reports decisions through `tracing`.
    ///
    /// Fails with [`AlarmError::ConflictingFilters`](crate::AlarmError::ConflictingFilters)
    /// if any dimension has both an include and an exclude list.
    pub fn new(options: FilterOptions) -> Result<Self> {
        Self::with_observer(options, Arc::new(TracingObserver))
    }

    /// Build a pipeline with a custom observer.
    pub fn with_observer(options: FilterOptions, observer: Arc<dyn FilterObserver>) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, observer })
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Run every stage in order, classifying the collection in place.
    pub fn run(&self, alarms: &mut TriggeredAlarms) {
        let records = alarms.as_mut_slice();
        for stage in FilterStage::ORDER {
            self.run_stage(stage, records);
            debug!(
                stage = %stage,
                excluded = records.iter().filter(|a| a.is_excluded()).count(),
                total = records.len(),
                "filter stage complete"
            );
        }
    }

    /// Run a single stage. Exposed for callers that need one dimension only.
    pub fn run_stage(&self, stage: FilterStage, records: &mut [TriggeredAlarm]) {
        let observer = self.observer.as_ref();
        let (include, exclude) = self.options.lists(stage);
        match stage {
            FilterStage::Acknowledged => filter_by_acknowledged_state(
                records,
                self.options.evaluate_acknowledged_alarms,
                observer,
            ),
            FilterStage::EntityType => filter_by_entity_type(records, include, exclude, observer),
            FilterStage::AlarmName => {
                filter_by_text(records, TextField::AlarmName, include, exclude, observer)
            }
            FilterStage::AlarmDescription => {
                filter_by_text(records, TextField::AlarmDescription, include, exclude, observer)
            }
            FilterStage::Status => filter_by_status(records, include, exclude, observer),
            FilterStage::EntityName => {
                filter_by_text(records, TextField::EntityName, include, exclude, observer)
            }
            FilterStage::ResourcePool => {
                filter_by_resource_pool(records, include, exclude, observer)
            }
        }
    }
}
