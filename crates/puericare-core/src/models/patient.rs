//! Patient records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A child enrolled with the practice.
///
/// Serialized field names match the versioned storage slots
/// (`pueri_patients_v6`), hence the camelCase wire form and the `parent`
/// name for the guardian field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Numeric id, unique within the practice
    pub id: u64,
    /// Child's name
    pub name: String,
    /// Guardian (parent/caregiver) name
    #[serde(rename = "parent")]
    pub guardian_name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Assigned practitioner id, if any
    #[serde(default)]
    pub professional_id: Option<String>,
    /// Most recent recorded visit
    #[serde(default)]
    pub last_checkin: Option<NaiveDateTime>,
    /// Scheduled follow-up, derived from the last visit
    #[serde(default)]
    pub next_checkin: Option<NaiveDate>,
    /// Contact phone; empty when unknown
    #[serde(default)]
    pub phone: String,
}

impl Patient {
    /// Create a patient with required fields; scheduling fields start
    /// empty and the practitioner unassigned.
    pub fn new(id: u64, name: String, guardian_name: String, birth_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            guardian_name,
            birth_date,
            professional_id: None,
            last_checkin: None,
            next_checkin: None,
            phone: String::new(),
        }
    }

    /// Whether any visit has been recorded.
    pub fn has_checked_in(&self) -> bool {
        self.last_checkin.is_some()
    }
}
