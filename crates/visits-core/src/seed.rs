//! Hard-coded seed datasets.
//!
//! The values are fixed by the demos: each flow writes its own set of
//! five rows and verifies the count afterwards.

use chrono::NaiveDate;

use crate::record::VisitRecord;

/// Rows the VM flow writes: patients 1-5, early September 2025.
pub const VM_ROWS: [VisitRecord; 5] = [
    visit(1, date(2025, 9, 1), 118, 76),
    visit(2, date(2025, 9, 2), 130, 85),
    visit(3, date(2025, 9, 3), 121, 79),
    visit(4, date(2025, 9, 4), 110, 70),
    visit(5, date(2025, 9, 5), 125, 82),
];

/// Rows the managed flow writes: patients 10-14, early October 2025.
pub const MANAGED_ROWS: [VisitRecord; 5] = [
    visit(10, date(2025, 10, 1), 117, 75),
    visit(11, date(2025, 10, 2), 131, 86),
    visit(12, date(2025, 10, 3), 122, 80),
    visit(13, date(2025, 10, 4), 111, 71),
    visit(14, date(2025, 10, 5), 126, 83),
];

const fn visit(patient_id: i64, visit_date: NaiveDate, bp_sys: i32, bp_dia: i32) -> VisitRecord {
    VisitRecord {
        patient_id,
        visit_date,
        bp_sys,
        bp_dia,
    }
}

// Evaluated at compile time, so an invalid date is a build error.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}
