//! Individual include/exclude stages.
//!
//! Each stage walks the whole collection once. With an exclude list, every
//! matching record is explicitly excluded and non-matches are left alone.
//! With an include list, matches are included and non-matches implicitly
//! excluded unless an earlier stage already included them. A stage with
//! neither list, or an empty collection, does nothing.

use crate::alarm::TriggeredAlarm;
use crate::classification::{FilterStage, StageOutcome};
use crate::observer::{FilterObserver, Transition};

use super::matching::{keyword_matches, pool_matches, text_matches, TextField};

fn classify(
    alarm: &mut TriggeredAlarm,
    stage: FilterStage,
    outcome: StageOutcome,
    observer: &dyn FilterObserver,
) {
    let (from, to) = alarm.classify(stage, outcome);
    observer.on_transition(&Transition {
        key: &alarm.key,
        stage,
        outcome,
        from,
        to,
    });
}

/// Shared driver for list-based stages.
fn apply_lists<F>(
    alarms: &mut [TriggeredAlarm],
    stage: FilterStage,
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
    matches: F,
) where
    F: Fn(&TriggeredAlarm, &[String]) -> bool,
{
    if alarms.is_empty() || (include.is_empty() && exclude.is_empty()) {
        observer.on_stage_skipped(stage);
        return;
    }

    // Exclusions first so an include list in the same call can never
    // revive a record this stage excludes.
    if !exclude.is_empty() {
        for alarm in alarms.iter_mut() {
            if matches(alarm, exclude) {
                classify(alarm, stage, StageOutcome::ExcludeMatched, observer);
            }
        }
    }

    if !include.is_empty() {
        for alarm in alarms.iter_mut() {
            let outcome = if matches(alarm, include) {
                StageOutcome::IncludeMatched
            } else {
                StageOutcome::IncludeMissed
            };
            classify(alarm, stage, outcome, observer);
        }
    }
}

/// Explicitly exclude acknowledged alarms unless they are to be evaluated.
pub fn filter_by_acknowledged_state(
    alarms: &mut [TriggeredAlarm],
    evaluate_acknowledged: bool,
    observer: &dyn FilterObserver,
) {
    let stage = FilterStage::Acknowledged;
    if alarms.is_empty() || evaluate_acknowledged {
        observer.on_stage_skipped(stage);
        return;
    }

    for alarm in alarms.iter_mut().filter(|a| a.acknowledged) {
        classify(alarm, stage, StageOutcome::ExcludeMatched, observer);
    }
}

/// Filter on the entity's managed object type (exact keyword).
pub fn filter_by_entity_type(
    alarms: &mut [TriggeredAlarm],
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
) {
    apply_lists(alarms, FilterStage::EntityType, include, exclude, observer, |a, list| {
        keyword_matches(a.entity_type(), list)
    });
}

/// Filter on a free-text field (exact or substring).
pub fn filter_by_text(
    alarms: &mut [TriggeredAlarm],
    field: TextField,
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
) {
    apply_lists(alarms, field.stage(), include, exclude, observer, |a, list| {
        text_matches(field.value(a), list)
    });
}

/// Filter on a free-text field addressed by keyword; unknown keywords
/// fall back to the alarm name.
pub fn filter_by_field_keyword(
    alarms: &mut [TriggeredAlarm],
    keyword: &str,
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
) {
    filter_by_text(alarms, TextField::from_keyword(keyword), include, exclude, observer);
}

/// Filter on the reported status color (exact keyword).
pub fn filter_by_status(
    alarms: &mut [TriggeredAlarm],
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
) {
    apply_lists(alarms, FilterStage::Status, include, exclude, observer, |a, list| {
        keyword_matches(a.status.as_str(), list)
    });
}

/// Filter on resource-pool membership (exact, any pool).
pub fn filter_by_resource_pool(
    alarms: &mut [TriggeredAlarm],
    include: &[String],
    exclude: &[String],
    observer: &dyn FilterObserver,
) {
    apply_lists(alarms, FilterStage::ResourcePool, include, exclude, observer, |a, list| {
        pool_matches(&a.resource_pools, list)
    });
}
