//! Bulk roster import.
//!
//! Rows arrive from the external tabular parser as loosely-typed field
//! maps; each usable row becomes a [`Patient`] assigned to a resolved
//! practitioner. Rows missing a name or a parseable birth date are
//! dropped and counted, not errored: a partial batch is a success, and
//! the caller reports only how many records made it in.

mod fields;
mod matcher;

pub use fields::*;
pub use matcher::*;

use thiserror::Error;
use tracing::debug;

use crate::models::{Patient, Practitioner};

/// Import errors.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("no practitioners registered; add one before importing")]
    NoPractitioners,
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Monotonic patient-id allocator shared by manual entry and import.
#[derive(Debug, Clone)]
pub struct PatientIdAllocator {
    next: u64,
}

impl PatientIdAllocator {
    /// Start allocating above every id already in use.
    pub fn seeded_from(patients: &[Patient]) -> Self {
        Self {
            next: patients.iter().map(|p| p.id).max().unwrap_or(0) + 1,
        }
    }

    /// Hand out the next id; never repeats within the allocator's life.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Result of one import batch.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Imported patients, in input row order.
    pub patients: Vec<Patient>,
    /// Rows dropped for a missing name or unusable birth date.
    pub skipped: usize,
    /// How each patient's practitioner was resolved, same order.
    pub matches: Vec<PractitionerMatch>,
}

impl ImportOutcome {
    /// Count reported to the user after a batch.
    pub fn imported(&self) -> usize {
        self.patients.len()
    }
}

/// Normalize raw rows into patient records.
///
/// Fails up front when no practitioner exists to assign; otherwise
/// produces the new patients without touching any collection. Appending
/// is the caller's job.
pub fn import_rows(
    rows: &[RosterRow],
    practitioners: &[Practitioner],
    ids: &mut PatientIdAllocator,
) -> ImportResult<ImportOutcome> {
    if practitioners.is_empty() {
        return Err(ImportError::NoPractitioners);
    }

    let mut patients = Vec::new();
    let mut matches = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in rows.iter().enumerate() {
        let name = row
            .field(NAME_ALIASES)
            .map(|cell| cell.as_text())
            .unwrap_or_default();
        let birth_date = row.field(BIRTH_DATE_ALIASES).and_then(|cell| cell.as_date());

        let (name, birth_date) = match (name.trim(), birth_date) {
            (trimmed, Some(date)) if !trimmed.is_empty() => (trimmed.to_string(), date),
            _ => {
                debug!(row = index, "dropping roster row without name or birth date");
                skipped += 1;
                continue;
            }
        };

        let guardian_name = row
            .field(GUARDIAN_ALIASES)
            .map(|cell| cell.as_text())
            .filter(|guardian| !guardian.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string());
        let phone = row
            .field(PHONE_ALIASES)
            .map(|cell| cell.as_text())
            .unwrap_or_default();

        let raw_practitioner = row
            .field(PRACTITIONER_ALIASES)
            .map(|cell| cell.as_text());
        let matched = match_practitioner(raw_practitioner.as_deref(), practitioners);
        if let MatchMethod::Fallback { suggestion } = &matched.method {
            debug!(row = index, ?suggestion, "practitioner reference fell back to default");
        }

        let mut patient = Patient::new(ids.next_id(), name, guardian_name, birth_date);
        patient.professional_id = Some(matched.practitioner_id.clone());
        patient.phone = phone;

        patients.push(patient);
        matches.push(matched);
    }

    Ok(ImportOutcome {
        patients,
        skipped,
        matches,
    })
}
