//! Boundary object handed to the reporting layer.

use serde::Serialize;
use vcheck_core::Severity;

use crate::aggregate::SeverityCounts;
use crate::collection::TriggeredAlarms;
use crate::options::FilterOptions;

/// Aggregated view of a classified collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmSummary {
    pub overall_severity: Severity,
    pub include_excluded: bool,
    pub total: usize,
    pub counts: SeverityCounts,
    pub num_excluded: usize,
    pub num_excluded_final: usize,
    pub keys: Vec<String>,
    pub keys_excluded: Vec<String>,
    pub datacenters: Vec<String>,
    pub resource_pools: Vec<String>,
    pub filters: FilterOptions,
}

impl TriggeredAlarms {
    /// Summarize the collection as classified under `filters`.
    pub fn summary(&self, filters: &FilterOptions, include_excluded: bool) -> AlarmSummary {
        AlarmSummary {
            overall_severity: self.overall_severity(include_excluded),
            include_excluded,
            total: self.len(),
            counts: self.severity_counts(include_excluded),
            num_excluded: self.num_excluded(),
            num_excluded_final: self.num_excluded_final(),
            keys: self.keys(),
            keys_excluded: self.keys_excluded(),
            datacenters: self.datacenters(),
            resource_pools: self.resource_pools(),
            filters: filters.clone(),
        }
    }
}
