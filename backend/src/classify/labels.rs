use lazy_static::lazy_static;
use shared::{Priority, Severity};
use std::collections::HashMap;

/// Fixed ordered label registry. The classifier's output vector is indexed
/// by position in this list, so the order must match the trained model.
pub const CLASS_LABELS: [&str; 8] = [
    "Accident",
    "Domestic_trash",
    "Infrastructure_Damage_Concrete",
    "Non Accident",
    "Parking_Issues_Illegal_Parking",
    "Road_Issues_Damaged_Sign",
    "Road_Issues_Pothole",
    "Vandalism_Graffiti",
];

lazy_static! {
    /// Static label → (severity, priority) triage table.
    pub static ref TRIAGE_TABLE: HashMap<&'static str, (Severity, Priority)> = HashMap::from([
        ("Accident", (Severity::Critical, Priority::High)),
        ("Domestic_trash", (Severity::Medium, Priority::Medium)),
        ("Infrastructure_Damage_Concrete", (Severity::High, Priority::High)),
        ("Non Accident", (Severity::Info, Priority::Low)),
        ("Parking_Issues_Illegal_Parking", (Severity::Medium, Priority::Medium)),
        ("Road_Issues_Damaged_Sign", (Severity::High, Priority::High)),
        ("Road_Issues_Pothole", (Severity::High, Priority::High)),
        ("Vandalism_Graffiti", (Severity::Medium, Priority::Medium)),
    ]);
}

/// Checks that the triage table covers every registry label. Run at startup;
/// a gap means the table and the model disagree and the service must not
/// come up relying on the Unknown fallback.
pub fn verify_triage_table() -> Result<(), String> {
    let unmapped: Vec<&str> = CLASS_LABELS
        .iter()
        .filter(|label| !TRIAGE_TABLE.contains_key(*label))
        .copied()
        .collect();
    if unmapped.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "triage table is missing entries for: {}",
            unmapped.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_table_covers_every_label() {
        assert!(verify_triage_table().is_ok());
        assert_eq!(CLASS_LABELS.len(), 8);
    }

    #[test]
    fn table_matches_the_reference_values() {
        assert_eq!(
            TRIAGE_TABLE["Accident"],
            (Severity::Critical, Priority::High)
        );
        assert_eq!(TRIAGE_TABLE["Non Accident"], (Severity::Info, Priority::Low));
        assert_eq!(
            TRIAGE_TABLE["Road_Issues_Pothole"],
            (Severity::High, Priority::High)
        );
        assert_eq!(
            TRIAGE_TABLE["Vandalism_Graffiti"],
            (Severity::Medium, Priority::Medium)
        );
    }
}
