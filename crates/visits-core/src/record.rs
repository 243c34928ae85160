//! Core record model for patient visits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the `visits` table.
///
/// Field names match the table's column names, so a serialized record
/// is also the column contract the adapter writes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Patient identifier, not checked for uniqueness.
    pub patient_id: i64,
    /// Day of the visit.
    pub visit_date: NaiveDate,
    /// Systolic blood pressure.
    pub bp_sys: i32,
    /// Diastolic blood pressure.
    pub bp_dia: i32,
}

impl VisitRecord {
    pub fn new(patient_id: i64, visit_date: NaiveDate, bp_sys: i32, bp_dia: i32) -> Self {
        Self {
            patient_id,
            visit_date,
            bp_sys,
            bp_dia,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> VisitRecord {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        VisitRecord::new(1, date, 118, 76)
    }

    #[test]
    fn serializes_with_column_names() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "patient_id": 1,
                "visit_date": "2025-09-01",
                "bp_sys": 118,
                "bp_dia": 76,
            })
        );
    }

    #[test]
    fn deserializes_from_column_names() {
        let record: VisitRecord = serde_json::from_str(
            r#"{"patient_id": 3, "visit_date": "2025-09-03", "bp_sys": 121, "bp_dia": 79}"#,
        )
        .unwrap();
        assert_eq!(record.patient_id, 3);
        assert_eq!(record.visit_date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        assert_eq!(record.bp_sys, 121);
        assert_eq!(record.bp_dia, 79);
    }
}
