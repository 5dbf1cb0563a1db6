mod cli;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use vcheck_alarms::audit_log::{LogEntry, LogQueryParams};
use vcheck_alarms::{
    AlarmSummary, AuditLog, FilterObserver, FilterOptions, FilterPipeline, TracingObserver,
    TriggeredAlarm, TriggeredAlarms,
};
use vcheck_core::config::{load_dotenv, Config};

use crate::cli::CliArgs;

#[derive(Serialize)]
struct Report<'a> {
    summary: AlarmSummary,
    alarms: Vec<&'a TriggeredAlarm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit: Option<BTreeMap<String, Vec<LogEntry>>>,
}

/// The alarms to report: the one matching `key`, or all of them.
fn select<'a>(
    alarms: &'a TriggeredAlarms,
    key: Option<&str>,
) -> vcheck_core::Result<Vec<&'a TriggeredAlarm>> {
    match key {
        Some(key) => Ok(vec![alarms.get(key)?]),
        None => Ok(alarms.iter().collect()),
    }
}

fn main() -> Result<()> {
    load_dotenv();
    let config = Config::from_env().context("invalid environment configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config.log_summary();
    let args = CliArgs::parse();

    let snapshot_path = args
        .snapshot
        .context("no snapshot given (use --snapshot or VCHECK_SNAPSHOT)")?;
    let mut alarms = TriggeredAlarms::load(&snapshot_path)
        .with_context(|| format!("failed to load snapshot: {}", snapshot_path.display()))?;

    let options = match args.filters {
        Some(path) => FilterOptions::load(&path)
            .with_context(|| format!("failed to load filters: {}", path.display()))?,
        None => {
            warn!("no filter options given, only acknowledged alarms will be excluded");
            FilterOptions::default()
        }
    };

    let audit_log = args.audit.then(|| Arc::new(AuditLog::new()));
    let observer: Arc<dyn FilterObserver> = match &audit_log {
        Some(log) => log.clone(),
        None => Arc::new(TracingObserver),
    };
    let pipeline =
        FilterPipeline::with_observer(options, observer).context("invalid filter options")?;
    pipeline.run(&mut alarms);

    let include_excluded = args.include_excluded || config.include_excluded;
    let summary = alarms.summary(pipeline.options(), include_excluded);
    info!(
        total = summary.total,
        excluded = summary.num_excluded,
        severity = %summary.overall_severity,
        "alarms classified"
    );

    let selected = select(&alarms, args.key.as_deref())?;

    let audit = audit_log.map(|log| {
        let params = LogQueryParams::default();
        selected
            .iter()
            .map(|alarm| (alarm.key.clone(), log.query(&alarm.key, &params)))
            .collect()
    });

    let report = Report {
        summary,
        alarms: selected,
        audit,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcheck_core::CheckError;

    #[test]
    fn select_unknown_key_is_not_found() {
        let alarms = TriggeredAlarms::default();
        assert!(select(&alarms, None).unwrap().is_empty());
        match select(&alarms, Some("alarm-7.datastore-1021")) {
            Err(CheckError::NotFound(key)) => assert_eq!(key, "alarm-7.datastore-1021"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
