use serde::{Deserialize, Serialize};

/// Reference to a managed object in the inventory (type plus opaque id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedObjectRef {
    /// Managed object type, e.g. `Datastore`, `VirtualMachine`, `Alarm`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Inventory-assigned id, e.g. `datastore-1021`.
    pub value: String,
}

impl ManagedObjectRef {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ManagedObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Check severity.
///
/// Variant order is the ranking used when reducing a collection to one
/// overall severity: `Ok < Warning < Unknown < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Ok,
        Severity::Warning,
        Severity::Unknown,
        Severity::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Unknown => "UNKNOWN",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall status color as reported by the inventory service.
///
/// Values outside the four known colors are preserved verbatim so they can
/// still be matched by status filters and shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusColor {
    Gray,
    Green,
    Yellow,
    Red,
    Other(String),
}

impl StatusColor {
    pub fn as_str(&self) -> &str {
        match self {
            StatusColor::Gray => "gray",
            StatusColor::Green => "green",
            StatusColor::Yellow => "yellow",
            StatusColor::Red => "red",
            StatusColor::Other(raw) => raw,
        }
    }

    /// Map the color to a check severity.
    ///
    /// Unrecognized colors map to [`Severity::Critical`].
    pub fn severity(&self) -> Severity {
        match self {
            StatusColor::Gray => Severity::Unknown,
            StatusColor::Green => Severity::Ok,
            StatusColor::Yellow => Severity::Warning,
            StatusColor::Red | StatusColor::Other(_) => Severity::Critical,
        }
    }
}

impl From<String> for StatusColor {
    fn from(raw: String) -> Self {
        match raw.to_lowercase().as_str() {
            "gray" => StatusColor::Gray,
            "green" => StatusColor::Green,
            "yellow" => StatusColor::Yellow,
            "red" => StatusColor::Red,
            _ => {
                tracing::warn!(status = %raw, "unrecognized status color, treating as CRITICAL");
                StatusColor::Other(raw)
            }
        }
    }
}

impl From<&str> for StatusColor {
    fn from(raw: &str) -> Self {
        StatusColor::from(raw.to_string())
    }
}

impl From<StatusColor> for String {
    fn from(color: StatusColor) -> Self {
        match color {
            StatusColor::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_colors_map_to_severity() {
        assert_eq!(StatusColor::from("gray").severity(), Severity::Unknown);
        assert_eq!(StatusColor::from("green").severity(), Severity::Ok);
        assert_eq!(StatusColor::from("yellow").severity(), Severity::Warning);
        assert_eq!(StatusColor::from("red").severity(), Severity::Critical);
    }

    #[test]
    fn color_parsing_ignores_case() {
        assert_eq!(StatusColor::from("RED"), StatusColor::Red);
        assert_eq!(StatusColor::from("Yellow"), StatusColor::Yellow);
    }

    #[test]
    fn unknown_color_is_critical() {
        let color = StatusColor::from("purple");
        assert_eq!(color, StatusColor::Other("purple".to_string()));
        assert_eq!(color.severity(), Severity::Critical);
        assert_eq!(color.as_str(), "purple");
    }

    #[test]
    fn unknown_color_warns_once_at_parse() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        struct WarnCounter(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if *event.metadata().level() == tracing::Level::WARN {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let color = StatusColor::from("chartreuse");
            for _ in 0..3 {
                assert_eq!(color.severity(), Severity::Critical);
            }
            assert_eq!(StatusColor::from("red").severity(), Severity::Critical);
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Unknown);
        assert!(Severity::Unknown < Severity::Critical);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn status_color_serde_uses_plain_strings() {
        let json = serde_json::to_string(&StatusColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
        let parsed: StatusColor = serde_json::from_str("\"magenta\"").unwrap();
        assert_eq!(parsed, StatusColor::Other("magenta".to_string()));
    }

    #[test]
    fn severity_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"WARNING\"");
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn managed_object_ref_display() {
        let r = ManagedObjectRef::new("Datastore", "datastore-12");
        assert_eq!(r.to_string(), "Datastore:datastore-12");
    }
}
