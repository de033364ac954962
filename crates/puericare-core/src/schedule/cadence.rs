//! Visit cadence policy and check-in application.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::Patient;

use super::age::age_info;

/// Required follow-up frequency class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

/// Frequency mandated by age in whole months: monthly through the first
/// year, quarterly through the second, annual after.
pub fn required_frequency(age_months: u32) -> Frequency {
    if age_months < 12 {
        Frequency::Monthly
    } else if age_months < 24 {
        Frequency::Quarterly
    } else {
        Frequency::Annual
    }
}

/// Project the follow-up date for a visit.
///
/// Calendar arithmetic clamps at month end (Jan 31 + 1 month =
/// Feb 28/29) and saturates at the calendar limit instead of
/// overflowing.
pub fn project_next_visit(visit: NaiveDate, frequency: Frequency) -> NaiveDate {
    let months = match frequency {
        Frequency::Monthly => 1,
        Frequency::Quarterly => 3,
        Frequency::Annual => 12,
    };
    visit
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Record a visit, returning the updated patient.
///
/// The frequency comes from the age *at the visit date*, so a backdated
/// check-in schedules from that date's age rather than today's. Only the
/// scheduling fields change; the input record is not mutated.
pub fn apply_checkin(
    patient: &Patient,
    visit_date: NaiveDate,
    visit_time: Option<NaiveTime>,
) -> Patient {
    let age = age_info(patient.birth_date, visit_date);
    let frequency = required_frequency(age.months);
    let time = visit_time.unwrap_or(NaiveTime::MIN);

    Patient {
        last_checkin: Some(NaiveDateTime::new(visit_date, time)),
        next_checkin: Some(project_next_visit(visit_date, frequency)),
        ..patient.clone()
    }
}
