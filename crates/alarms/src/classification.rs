//! Per-record classification state and its transition table.
//!
//! A record moves through four reachable states while the filter pipeline
//! runs. Every change goes through [`Classification::apply`]; explicit
//! exclusion is absorbing for inclusion outcomes.

use serde::{Deserialize, Serialize};

/// One of the fixed filter stages, in pipeline order.
///
/// The serialized form is the human-readable label that ends up as a
/// record's exclude reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterStage {
    #[serde(rename = "alarm is acknowledged")]
    Acknowledged,
    #[serde(rename = "object type")]
    EntityType,
    #[serde(rename = "alarm name")]
    AlarmName,
    #[serde(rename = "alarm description")]
    AlarmDescription,
    #[serde(rename = "alarm status")]
    Status,
    #[serde(rename = "entity name")]
    EntityName,
    #[serde(rename = "resource pool")]
    ResourcePool,
}

impl FilterStage {
    /// Fixed evaluation order. Later stages only fall back to implicit
    /// exclusion for records no earlier stage explicitly decided, so this
    /// order is part of the contract.
    pub const ORDER: [FilterStage; 7] = [
        FilterStage::Acknowledged,
        FilterStage::EntityType,
        FilterStage::AlarmName,
        FilterStage::AlarmDescription,
        FilterStage::Status,
        FilterStage::EntityName,
        FilterStage::ResourcePool,
    ];

    /// Label recorded as the exclude reason.
    pub fn label(&self) -> &'static str {
        match self {
            FilterStage::Acknowledged => "alarm is acknowledged",
            FilterStage::EntityType => "object type",
            FilterStage::AlarmName => "alarm name",
            FilterStage::AlarmDescription => "alarm description",
            FilterStage::Status => "alarm status",
            FilterStage::EntityName => "entity name",
            FilterStage::ResourcePool => "resource pool",
        }
    }
}

impl std::fmt::Display for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single stage concluded about a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// Record matched an entry of the stage's include list.
    IncludeMatched,
    /// Include list was active and the record matched none of it.
    IncludeMissed,
    /// Record matched an entry of the stage's exclude list.
    ExcludeMatched,
    /// Exclude list was active and the record matched none of it.
    ExcludeMissed,
}

/// Classification of a record by the filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Classification {
    /// No active stage has said anything about the record yet.
    #[default]
    Undecided,
    /// Matched at least one inclusion list and was not explicitly excluded.
    Included,
    /// Missed an inclusion list; a later inclusion match can still revive it.
    ImplicitlyExcluded(FilterStage),
    /// Matched an exclusion list. Permanent for the rest of the pipeline.
    ExplicitlyExcluded(FilterStage),
}

impl Classification {
    /// Transition table for one stage outcome.
    pub fn apply(self, stage: FilterStage, outcome: StageOutcome) -> Classification {
        use Classification::*;
        use StageOutcome::*;

        match (self, outcome) {
            (_, ExcludeMatched) => ExplicitlyExcluded(stage),
            (state, ExcludeMissed) => state,
            (ExplicitlyExcluded(reason), IncludeMatched | IncludeMissed) => {
                ExplicitlyExcluded(reason)
            }
            (_, IncludeMatched) => Included,
            (Included, IncludeMissed) => Included,
            (Undecided | ImplicitlyExcluded(_), IncludeMissed) => ImplicitlyExcluded(stage),
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            Classification::ImplicitlyExcluded(_) | Classification::ExplicitlyExcluded(_)
        )
    }

    pub fn is_explicitly_included(&self) -> bool {
        matches!(self, Classification::Included)
    }

    pub fn is_explicitly_excluded(&self) -> bool {
        matches!(self, Classification::ExplicitlyExcluded(_))
    }

    /// Stage that last excluded the record, if it is currently excluded.
    pub fn exclude_reason(&self) -> Option<FilterStage> {
        match self {
            Classification::ImplicitlyExcluded(stage)
            | Classification::ExplicitlyExcluded(stage) => Some(*stage),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Undecided => f.write_str("undecided"),
            Classification::Included => f.write_str("explicitly included"),
            Classification::ImplicitlyExcluded(stage) => {
                write!(f, "implicitly excluded ({})", stage)
            }
            Classification::ExplicitlyExcluded(stage) => {
                write!(f, "explicitly excluded ({})", stage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OUTCOMES: [StageOutcome; 4] = [
        StageOutcome::IncludeMatched,
        StageOutcome::IncludeMissed,
        StageOutcome::ExcludeMatched,
        StageOutcome::ExcludeMissed,
    ];

    #[test]
    fn include_match_marks_included() {
        let state = Classification::Undecided.apply(FilterStage::EntityType, StageOutcome::IncludeMatched);
        assert_eq!(state, Classification::Included);
        assert!(!state.is_excluded());
        assert!(state.is_explicitly_included());
    }

    #[test]
    fn include_miss_excludes_implicitly_with_stage_reason() {
        let state = Classification::Undecided.apply(FilterStage::EntityType, StageOutcome::IncludeMissed);
        assert_eq!(state, Classification::ImplicitlyExcluded(FilterStage::EntityType));
        assert_eq!(state.exclude_reason(), Some(FilterStage::EntityType));
        assert!(!state.is_explicitly_excluded());
    }

    #[test]
    fn later_include_miss_refreshes_implicit_reason() {
        let state = Classification::ImplicitlyExcluded(FilterStage::EntityType)
            .apply(FilterStage::Status, StageOutcome::IncludeMissed);
        assert_eq!(state, Classification::ImplicitlyExcluded(FilterStage::Status));
    }

    #[test]
    fn implicit_exclusion_is_reversible() {
        let state = Classification::ImplicitlyExcluded(FilterStage::EntityType)
            .apply(FilterStage::AlarmName, StageOutcome::IncludeMatched);
        assert_eq!(state, Classification::Included);
    }

    #[test]
    fn included_survives_later_include_miss() {
        let state = Classification::Included.apply(FilterStage::ResourcePool, StageOutcome::IncludeMissed);
        assert_eq!(state, Classification::Included);
    }

    #[test]
    fn explicit_exclusion_is_absorbing_for_include_outcomes() {
        for stage in FilterStage::ORDER {
            for outcome in [StageOutcome::IncludeMatched, StageOutcome::IncludeMissed, StageOutcome::ExcludeMissed] {
                let state = Classification::ExplicitlyExcluded(FilterStage::Acknowledged).apply(stage, outcome);
                assert_eq!(state, Classification::ExplicitlyExcluded(FilterStage::Acknowledged));
            }
        }
    }

    #[test]
    fn exclude_match_always_wins() {
        let starts = [
            Classification::Undecided,
            Classification::Included,
            Classification::ImplicitlyExcluded(FilterStage::EntityType),
            Classification::ExplicitlyExcluded(FilterStage::Acknowledged),
        ];
        for start in starts {
            let state = start.apply(FilterStage::AlarmName, StageOutcome::ExcludeMatched);
            assert_eq!(state, Classification::ExplicitlyExcluded(FilterStage::AlarmName));
            assert!(state.is_excluded());
            assert!(!state.is_explicitly_included());
        }
    }

    #[test]
    fn explicit_exclusion_implies_excluded_for_every_transition() {
        let starts = [
            Classification::Undecided,
            Classification::Included,
            Classification::ImplicitlyExcluded(FilterStage::EntityType),
            Classification::ExplicitlyExcluded(FilterStage::Status),
        ];
        for start in starts {
            for stage in FilterStage::ORDER {
                for outcome in ALL_OUTCOMES {
                    let next = start.apply(stage, outcome);
                    if next.is_explicitly_excluded() {
                        assert!(next.is_excluded());
                    }
                    if start.is_explicitly_excluded() {
                        assert!(next.is_explicitly_excluded(), "{start:?} + {outcome:?} cleared explicit exclusion");
                    }
                }
            }
        }
    }

    #[test]
    fn exclude_miss_is_a_no_op() {
        let state = Classification::Undecided.apply(FilterStage::EntityName, StageOutcome::ExcludeMissed);
        assert_eq!(state, Classification::Undecided);
    }

    #[test]
    fn serializes_with_stage_label_as_reason() {
        let json = serde_json::to_value(Classification::ExplicitlyExcluded(FilterStage::Acknowledged)).unwrap();
        assert_eq!(json["state"], "explicitly_excluded");
        assert_eq!(json["reason"], "alarm is acknowledged");

        let json = serde_json::to_value(Classification::Undecided).unwrap();
        assert_eq!(json["state"], "undecided");
    }

    #[test]
    fn stage_labels() {
        assert_eq!(FilterStage::EntityType.to_string(), "object type");
        assert_eq!(FilterStage::Acknowledged.label(), "alarm is acknowledged");
        assert_eq!(FilterStage::ORDER.len(), 7);
        assert_eq!(FilterStage::ORDER[0], FilterStage::Acknowledged);
        assert_eq!(FilterStage::ORDER[6], FilterStage::ResourcePool);
    }
}
