use crate::classify::labels::TRIAGE_TABLE;
use shared::{Priority, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triage {
    pub severity: Severity,
    pub priority: Priority,
}

/// Total over all label strings: registry labels hit the static table,
/// anything else resolves to the Unknown tier. Startup verifies the table
/// covers the registry, so the fallback only fires for foreign labels.
pub fn resolve(label: &str) -> Triage {
    match TRIAGE_TABLE.get(label) {
        Some(&(severity, priority)) => Triage { severity, priority },
        None => Triage {
            severity: Severity::Unknown,
            priority: Priority::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels::CLASS_LABELS;

    #[test]
    fn known_labels_match_the_static_table() {
        let accident = resolve("Accident");
        assert_eq!(accident.severity, Severity::Critical);
        assert_eq!(accident.priority, Priority::High);

        let benign = resolve("Non Accident");
        assert_eq!(benign.severity, Severity::Info);
        assert_eq!(benign.priority, Priority::Low);
    }

    #[test]
    fn every_registry_label_resolves_without_the_fallback() {
        for label in CLASS_LABELS {
            let triage = resolve(label);
            assert_ne!(triage.severity, Severity::Unknown, "label {label}");
            assert_ne!(triage.priority, Priority::Unknown, "label {label}");
        }
    }

    #[test]
    fn foreign_labels_fall_back_to_unknown() {
        let triage = resolve("Sinkhole");
        assert_eq!(triage.severity, Severity::Unknown);
        assert_eq!(triage.priority, Priority::Unknown);
    }
}
