//! The per-invocation collection of triggered alarms.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alarm::TriggeredAlarm;
use crate::error::{AlarmError, Result};
use crate::options::FilterOptions;
use crate::pipeline::FilterPipeline;

/// All triggered alarms retrieved for one check run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggeredAlarms {
    alarms: Vec<TriggeredAlarm>,
}

impl TriggeredAlarms {
    pub fn new(alarms: Vec<TriggeredAlarm>) -> Self {
        Self { alarms }
    }

    /// Parse a collector snapshot (a JSON array of records).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let alarms: Vec<TriggeredAlarm> = serde_json::from_str(json)?;
        Ok(Self::new(alarms))
    }

    /// Load a collector snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggeredAlarm> {
        self.alarms.iter()
    }

    pub fn as_slice(&self) -> &[TriggeredAlarm] {
        &self.alarms
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [TriggeredAlarm] {
        &mut self.alarms
    }

    pub fn into_inner(self) -> Vec<TriggeredAlarm> {
        self.alarms
    }

    /// Run the full filter pipeline with the default tracing observer.
    pub fn filter(&mut self, options: &FilterOptions) -> Result<()> {
        let pipeline = FilterPipeline::new(options.clone())?;
        pipeline.run(self);
        Ok(())
    }

    /// Look up a record by its key.
    pub fn get(&self, key: &str) -> Result<&TriggeredAlarm> {
        self.alarms
            .iter()
            .find(|a| a.key == key)
            .ok_or_else(|| AlarmError::NotFound {
                key: key.to_string(),
            })
    }

    /// Records currently marked excluded.
    pub fn excluded(&self) -> impl Iterator<Item = &TriggeredAlarm> {
        self.alarms.iter().filter(|a| a.is_excluded())
    }

    /// Records not marked excluded.
    pub fn included(&self) -> impl Iterator<Item = &TriggeredAlarm> {
        self.alarms.iter().filter(|a| !a.is_excluded())
    }

    /// Number of records excluded, implicitly or explicitly.
    pub fn num_excluded(&self) -> usize {
        self.excluded().count()
    }

    /// Number of excluded records that are in a non-OK state, i.e. problems
    /// hidden from the final result by filtering.
    pub fn num_excluded_final(&self) -> usize {
        self.excluded()
            .filter(|a| a.severity() != vcheck_core::Severity::Ok)
            .count()
    }

    /// Keys of records that are not excluded, case-insensitively sorted.
    pub fn keys(&self) -> Vec<String> {
        sorted_case_insensitive(
            self.alarms
                .iter()
                .filter(|a| !a.is_excluded())
                .map(|a| a.key.clone())
                .collect(),
        )
    }

    /// Keys of excluded records, case-insensitively sorted.
    pub fn keys_excluded(&self) -> Vec<String> {
        sorted_case_insensitive(self.excluded().map(|a| a.key.clone()).collect())
    }

    /// Unique datacenter names, case-insensitively sorted.
    pub fn datacenters(&self) -> Vec<String> {
        unique_sorted(self.alarms.iter().map(|a| a.datacenter.as_str()))
    }

    /// Unique resource-pool names, case-insensitively sorted.
    pub fn resource_pools(&self) -> Vec<String> {
        unique_sorted(
            self.alarms
                .iter()
                .flat_map(|a| a.resource_pools.iter().map(String::as_str)),
        )
    }
}

impl From<Vec<TriggeredAlarm>> for TriggeredAlarms {
    fn from(alarms: Vec<TriggeredAlarm>) -> Self {
        Self::new(alarms)
    }
}

impl FromIterator<TriggeredAlarm> for TriggeredAlarms {
    fn from_iter<I: IntoIterator<Item = TriggeredAlarm>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TriggeredAlarms {
    type Item = &'a TriggeredAlarm;
    type IntoIter = std::slice::Iter<'a, TriggeredAlarm>;

    fn into_iter(self) -> Self::IntoIter {
        self.alarms.iter()
    }
}

fn sorted_case_insensitive(mut values: Vec<String>) -> Vec<String> {
    values.sort_by_cached_key(|v| v.to_lowercase());
    values
}

/// Dedup ignoring case (first spelling wins), skip blanks, then sort.
fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let unique = values
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .map(str::to_string)
        .collect();
    sorted_case_insensitive(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmRef, EntityRef};
    use crate::classification::{Classification, FilterStage};
    use chrono::Utc;
    use vcheck_core::ManagedObjectRef;

    fn make_alarm(key: &str, datacenter: &str, pools: &[&str], status: &str) -> TriggeredAlarm {
        TriggeredAlarm::new(
            key,
            AlarmRef {
                reference: ManagedObjectRef::new("Alarm", "alarm-1"),
                name: "Virtual machine CPU usage".to_string(),
                description: String::new(),
            },
            EntityRef {
                reference: ManagedObjectRef::new("VirtualMachine", format!("vm-{}", key)),
                name: format!("vm {}", key),
            },
            status.into(),
            Utc::now(),
        )
        .with_datacenter(datacenter)
        .with_resource_pools(pools.iter().copied())
    }

    fn sample() -> TriggeredAlarms {
        let mut alarms = vec![
            make_alarm("b-2", "lab", &["Production", "Resources"], "red"),
            make_alarm("A-1", "Lab", &["production"], "green"),
            make_alarm("c-3", "Branch", &[], "yellow"),
        ];
        alarms[0].classification = Classification::ExplicitlyExcluded(FilterStage::Acknowledged);
        alarms[1].classification = Classification::ImplicitlyExcluded(FilterStage::EntityType);
        TriggeredAlarms::new(alarms)
    }

    #[test]
    fn get_by_key() {
        let alarms = sample();
        assert_eq!(alarms.get("c-3").unwrap().datacenter, "Branch");
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let alarms = sample();
        match alarms.get("missing") {
            Err(AlarmError::NotFound { key }) => assert_eq!(key, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn keys_are_case_insensitively_sorted() {
        let alarms = sample();
        assert_eq!(alarms.keys(), vec!["c-3"]);
        assert_eq!(alarms.keys_excluded(), vec!["A-1", "b-2"]);
    }

    #[test]
    fn keys_follow_classification() {
        let mut alarms = sample();
        for alarm in alarms.as_mut_slice() {
            alarm.classification = Classification::Undecided;
        }
        assert_eq!(alarms.keys(), vec!["A-1", "b-2", "c-3"]);
        assert!(alarms.keys_excluded().is_empty());

        alarms.as_mut_slice()[2].classification =
            Classification::ExplicitlyExcluded(FilterStage::ResourcePool);
        assert_eq!(alarms.keys(), vec!["A-1", "b-2"]);
        assert_eq!(alarms.keys_excluded(), vec!["c-3"]);
    }

    #[test]
    fn datacenters_and_pools_are_unique() {
        let alarms = sample();
        assert_eq!(alarms.datacenters(), vec!["Branch", "lab"]);
        assert_eq!(alarms.resource_pools(), vec!["Production", "Resources"]);
    }

    #[test]
    fn excluded_counts() {
        let alarms = sample();
        assert_eq!(alarms.num_excluded(), 2);
        // The green alarm is excluded but OK, so it does not count as hidden.
        assert_eq!(alarms.num_excluded_final(), 1);
        assert_eq!(alarms.included().count(), 1);
    }

    #[test]
    fn empty_collection_queries() {
        let alarms = TriggeredAlarms::default();
        assert!(alarms.is_empty());
        assert!(alarms.keys().is_empty());
        assert!(alarms.datacenters().is_empty());
        assert_eq!(alarms.num_excluded(), 0);
    }

    #[test]
    fn snapshot_is_a_json_array() {
        let alarms = sample();
        let json = serde_json::to_string(&alarms).unwrap();
        assert!(json.starts_with('['));
        let parsed = TriggeredAlarms::from_json_str(&json).unwrap();
        assert_eq!(parsed, alarms);
    }
}
