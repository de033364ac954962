//! Golden tests for the age and cadence engine.
//!
//! These pin the calendar arithmetic against known cases, including the
//! month-end clamp behavior.

use chrono::NaiveDate;
use puericare_core::schedule::{
    age_info, food_introduction_alert, project_next_visit, quarterly_reminder_applies,
    required_frequency, AgeInfo, Frequency,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Age test case.
struct AgeCase {
    id: &'static str,
    birth: (i32, u32, u32),
    today: (i32, u32, u32),
    expected_months: u32,
    expected_days: u32,
}

fn age_cases() -> Vec<AgeCase> {
    vec![
        AgeCase {
            id: "newborn-same-day",
            birth: (2024, 3, 10),
            today: (2024, 3, 10),
            expected_months: 0,
            expected_days: 0,
        },
        AgeCase {
            id: "two-weeks",
            birth: (2024, 3, 10),
            today: (2024, 3, 24),
            expected_months: 0,
            expected_days: 14,
        },
        AgeCase {
            id: "exactly-six-months",
            birth: (2024, 1, 15),
            today: (2024, 7, 15),
            expected_months: 6,
            expected_days: 0,
        },
        AgeCase {
            id: "day-before-monthly-birthday",
            birth: (2024, 1, 15),
            today: (2024, 7, 14),
            expected_months: 5,
            expected_days: 29,
        },
        AgeCase {
            id: "month-end-clamp-short-february",
            birth: (2024, 1, 31),
            today: (2024, 2, 28),
            expected_months: 0,
            expected_days: 28,
        },
        AgeCase {
            id: "month-end-clamp-crossed",
            birth: (2024, 1, 31),
            today: (2024, 3, 1),
            expected_months: 1,
            expected_days: 1,
        },
        AgeCase {
            id: "year-boundary",
            birth: (2023, 12, 31),
            today: (2024, 1, 1),
            expected_months: 0,
            expected_days: 1,
        },
        AgeCase {
            id: "toddler",
            birth: (2022, 6, 15),
            today: (2024, 8, 20),
            expected_months: 26,
            expected_days: 5,
        },
        AgeCase {
            id: "leap-day-birth",
            birth: (2024, 2, 29),
            today: (2025, 3, 1),
            expected_months: 12,
            expected_days: 1,
        },
    ]
}

#[test]
fn golden_age_cases() {
    for case in age_cases() {
        let (by, bm, bd) = case.birth;
        let (ty, tm, td) = case.today;
        let age = age_info(date(by, bm, bd), date(ty, tm, td));
        assert_eq!(
            age,
            AgeInfo {
                months: case.expected_months,
                days: case.expected_days
            },
            "case {}",
            case.id
        );
    }
}

#[test]
fn cadence_boundaries() {
    assert_eq!(required_frequency(11), Frequency::Monthly);
    assert_eq!(required_frequency(12), Frequency::Quarterly);
    assert_eq!(required_frequency(23), Frequency::Quarterly);
    assert_eq!(required_frequency(24), Frequency::Annual);
}

/// Projection test case.
struct ProjectionCase {
    id: &'static str,
    visit: (i32, u32, u32),
    frequency: Frequency,
    expected: (i32, u32, u32),
}

fn projection_cases() -> Vec<ProjectionCase> {
    vec![
        ProjectionCase {
            id: "monthly-into-leap-february",
            visit: (2024, 1, 31),
            frequency: Frequency::Monthly,
            expected: (2024, 2, 29),
        },
        ProjectionCase {
            id: "monthly-into-plain-february",
            visit: (2023, 1, 31),
            frequency: Frequency::Monthly,
            expected: (2023, 2, 28),
        },
        ProjectionCase {
            id: "monthly-plain",
            visit: (2024, 4, 15),
            frequency: Frequency::Monthly,
            expected: (2024, 5, 15),
        },
        ProjectionCase {
            id: "quarterly-across-year-end",
            visit: (2023, 11, 30),
            frequency: Frequency::Quarterly,
            expected: (2024, 2, 29),
        },
        ProjectionCase {
            id: "annual-from-leap-day",
            visit: (2024, 2, 29),
            frequency: Frequency::Annual,
            expected: (2025, 2, 28),
        },
        ProjectionCase {
            id: "annual-plain",
            visit: (2024, 7, 1),
            frequency: Frequency::Annual,
            expected: (2025, 7, 1),
        },
    ]
}

#[test]
fn golden_projection_cases() {
    for case in projection_cases() {
        let (vy, vm, vd) = case.visit;
        let (ey, em, ed) = case.expected;
        assert_eq!(
            project_next_visit(date(vy, vm, vd), case.frequency),
            date(ey, em, ed),
            "case {}",
            case.id
        );
    }
}

#[test]
fn food_alert_boundaries() {
    assert!(!food_introduction_alert(5, 24));
    assert!(food_introduction_alert(5, 25));
    assert!(food_introduction_alert(6, 5));
    assert!(!food_introduction_alert(6, 6));
}

#[test]
fn quarterly_reminder_boundary() {
    assert!(!quarterly_reminder_applies(11));
    assert!(quarterly_reminder_applies(12));
}
