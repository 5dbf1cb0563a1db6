use std::path::PathBuf;

use clap::Parser;

/// Classify triggered alarms from an inventory snapshot.
///
/// Reads the collector's JSON snapshot, applies the include/exclude filters
/// and prints the classified alarms together with the aggregate summary as
/// JSON.
#[derive(Parser, Debug)]
#[command(name = "check-alarms", version, about = "Filter triggered alarms and aggregate severity")]
pub struct CliArgs {
    /// Inventory snapshot (JSON array of triggered alarms).
    #[arg(long, env = "VCHECK_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// YAML filter options; no filters when unset.
    #[arg(long, env = "VCHECK_FILTERS")]
    pub filters: Option<PathBuf>,

    /// Evaluate every alarm regardless of exclusion state.
    /// Also enabled by VCHECK_INCLUDE_EXCLUDED (profile-aware).
    #[arg(long)]
    pub include_excluded: bool,

    /// Include the per-alarm filter audit trail in the output.
    #[arg(long)]
    pub audit: bool,

    /// Only print the alarm with this key.
    #[arg(long)]
    pub key: Option<String>,
}
