//! Age computation in whole months and residual days.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Age split into whole calendar months and leftover days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeInfo {
    pub months: u32,
    pub days: u32,
}

/// Compute the age at `today` for a child born on `birth`.
///
/// `months` counts whole calendar months; the running month counts only
/// once `today`'s day-of-month reaches `birth`'s. `days` measures from
/// `birth` advanced by `months` months, with month-end dates clamped
/// (Jan 31 + 1 month = Feb 28/29). The clamp rule means a month-end
/// birth date can carry residual days up to a full short month:
/// `age_info(2024-01-31, 2024-02-28)` is 0 months, 28 days.
///
/// A `today` at or before `birth` reports zero age.
pub fn age_info(birth: NaiveDate, today: NaiveDate) -> AgeInfo {
    if today <= birth {
        return AgeInfo { months: 0, days: 0 };
    }

    let mut months =
        (today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32;
    if today.day() < birth.day() {
        months -= 1;
    }
    let months = months.max(0) as u32;

    let anchor = birth
        .checked_add_months(Months::new(months))
        .unwrap_or(birth);
    let days = today.signed_duration_since(anchor).num_days().max(0) as u32;

    AgeInfo { months, days }
}
