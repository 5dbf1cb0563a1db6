//! Field matchers shared by the filter stages.
//!
//! All comparisons are case-insensitive. Keyword fields require equality;
//! free-text fields also accept substring containment.

use tracing::warn;

use crate::alarm::TriggeredAlarm;
use crate::classification::FilterStage;

/// Case-insensitive equality against any candidate.
pub(crate) fn keyword_matches(value: &str, candidates: &[String]) -> bool {
    let value = value.to_lowercase();
    candidates.iter().any(|c| c.to_lowercase() == value)
}

/// Case-insensitive equality or substring containment against any candidate.
pub(crate) fn text_matches(value: &str, candidates: &[String]) -> bool {
    let value = value.to_lowercase();
    candidates.iter().any(|c| {
        let c = c.to_lowercase();
        value == c || value.contains(&c)
    })
}

/// Case-insensitive equality of any pool against any candidate.
///
/// An entity without pools never matches.
pub(crate) fn pool_matches(pools: &[String], candidates: &[String]) -> bool {
    pools.iter().any(|pool| keyword_matches(pool, candidates))
}

/// Free-text field addressed by the substring stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    AlarmName,
    AlarmDescription,
    EntityName,
}

impl TextField {
    /// Resolve a field keyword (`name`, `description`, `entity`).
    ///
    /// Unknown keywords fall back to the alarm name.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "name" | "alarm_name" => TextField::AlarmName,
            "description" | "alarm_description" => TextField::AlarmDescription,
            "entity" | "entity_name" => TextField::EntityName,
            other => {
                warn!(keyword = %other, "unrecognized filter field keyword, matching on alarm name");
                TextField::AlarmName
            }
        }
    }

    pub fn stage(&self) -> FilterStage {
        match self {
            TextField::AlarmName => FilterStage::AlarmName,
            TextField::AlarmDescription => FilterStage::AlarmDescription,
            TextField::EntityName => FilterStage::EntityName,
        }
    }

    pub fn value<'a>(&self, alarm: &'a TriggeredAlarm) -> &'a str {
        match self {
            TextField::AlarmName => &alarm.alarm.name,
            TextField::AlarmDescription => &alarm.alarm.description,
            TextField::EntityName => &alarm.entity.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keyword_is_exact_and_case_insensitive() {
        assert!(keyword_matches("Datastore", &list(&["datastore"])));
        assert!(keyword_matches("red", &list(&["yellow", "RED"])));
        assert!(!keyword_matches("Datastore", &list(&["data"])));
        assert!(!keyword_matches("Datastore", &[]));
    }

    #[test]
    fn text_accepts_substring() {
        assert!(text_matches("CPU Usage", &list(&["usage"])));
        assert!(text_matches("CPU Usage", &list(&["cpu usage"])));
        assert!(!text_matches("CPU Usage", &list(&["memory"])));
    }

    #[test]
    fn pool_requires_exact_member() {
        let pools = list(&["Production", "Resources"]);
        assert!(pool_matches(&pools, &list(&["production"])));
        assert!(!pool_matches(&pools, &list(&["Prod"])));
        assert!(!pool_matches(&[], &list(&["Production"])));
    }

    #[test]
    fn field_keyword_resolution() {
        assert_eq!(TextField::from_keyword("name"), TextField::AlarmName);
        assert_eq!(TextField::from_keyword("Description"), TextField::AlarmDescription);
        assert_eq!(TextField::from_keyword("entity"), TextField::EntityName);
        assert_eq!(TextField::from_keyword("colour"), TextField::AlarmName);
    }

    #[test]
    fn field_stage_mapping() {
        assert_eq!(TextField::AlarmName.stage(), FilterStage::AlarmName);
        assert_eq!(TextField::EntityName.stage(), FilterStage::EntityName);
    }
}
