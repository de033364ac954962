//! Top-level application session.
//!
//! [`Clinic`] owns the in-memory collections and the durable store. Pure
//! computation (age, cadence, import normalization) runs over snapshots;
//! each mutation builds the replacement collection, writes the slot, and
//! only then commits in memory, so a failed write leaves no partial state.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::debug;

use crate::importer::{
    self, ImportError, ImportOutcome, PatientIdAllocator, RosterRow,
};
use crate::messaging;
use crate::models::{Note, Patient, Practitioner};
use crate::schedule::{self, AgeInfo, Frequency};
use crate::store::{
    self, KvStore, StoreError, NOTES_SLOT, PATIENTS_SLOT, PRACTITIONERS_SLOT,
};

/// Session-level errors.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("no patient with id {0}")]
    PatientNotFound(u64),

    #[error("no practitioner with id {0}")]
    PractitionerNotFound(String),

    #[error("practitioner {name} still has {patients} assigned patient(s)")]
    PractitionerInUse { name: String, patients: usize },

    #[error("a practitioner must be selected")]
    NoPractitionerSelected,

    #[error("patient {0} has no recorded or scheduled visit")]
    NoVisitScheduled(String),
}

pub type ClinicResult<T> = Result<T, ClinicError>;

/// Input for manually registering a patient.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub guardian_name: String,
    pub birth_date: NaiveDate,
    pub professional_id: String,
    pub phone: String,
}

/// Editable fields of an existing patient. Scheduling fields are derived
/// and stay out of reach.
#[derive(Debug, Clone)]
pub struct PatientEdit {
    pub name: String,
    pub guardian_name: String,
    pub birth_date: NaiveDate,
    pub professional_id: String,
    pub phone: String,
}

/// Check-in status criterion for roster filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckinFilter {
    #[default]
    All,
    Done,
    Pending,
}

/// Roster filter; all criteria must hold.
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    /// Case-insensitive substring over patient and guardian names.
    pub search: Option<String>,
    /// Restrict to one practitioner.
    pub professional_id: Option<String>,
    pub checkin: CheckinFilter,
}

/// Derived display fields for one patient at a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientOverview {
    pub age: AgeInfo,
    pub frequency: Frequency,
    pub food_introduction_alert: bool,
    pub quarterly_reminder: bool,
}

/// The running practice session.
pub struct Clinic {
    patients: Vec<Patient>,
    practitioners: Vec<Practitioner>,
    notes: Vec<Note>,
    ids: PatientIdAllocator,
    store: Box<dyn KvStore>,
}

impl Clinic {
    /// Open a session over `store`, loading whatever it holds.
    ///
    /// Missing or corrupt slots start empty; opening never fails.
    pub fn open(store: Box<dyn KvStore>) -> Self {
        let patients: Vec<Patient> = store::load_slot(store.as_ref(), PATIENTS_SLOT);
        let practitioners = store::load_slot(store.as_ref(), PRACTITIONERS_SLOT);
        let notes = store::load_slot(store.as_ref(), NOTES_SLOT);
        let ids = PatientIdAllocator::seeded_from(&patients);
        Self {
            patients,
            practitioners,
            notes,
            ids,
            store,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn practitioners(&self) -> &[Practitioner] {
        &self.practitioners
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn patient(&self, id: u64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn practitioner(&self, id: &str) -> Option<&Practitioner> {
        self.practitioners.iter().find(|p| p.id == id)
    }

    // =========================================================================
    // Practitioner Operations
    // =========================================================================

    /// Register a practitioner.
    pub fn add_practitioner(&mut self, name: &str) -> ClinicResult<Practitioner> {
        let practitioner = Practitioner::new(name.trim().to_string());
        let mut next = self.practitioners.clone();
        next.push(practitioner.clone());
        self.commit_practitioners(next)?;
        Ok(practitioner)
    }

    /// Remove a practitioner.
    ///
    /// Refused while any patient still references them; the collection is
    /// left untouched in that case.
    pub fn remove_practitioner(&mut self, id: &str) -> ClinicResult<()> {
        let practitioner = self
            .practitioner(id)
            .ok_or_else(|| ClinicError::PractitionerNotFound(id.to_string()))?;

        let assigned = self
            .patients
            .iter()
            .filter(|p| p.professional_id.as_deref() == Some(id))
            .count();
        if assigned > 0 {
            return Err(ClinicError::PractitionerInUse {
                name: practitioner.name.clone(),
                patients: assigned,
            });
        }

        let next = self
            .practitioners
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.commit_practitioners(next)
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient. A valid practitioner reference is required.
    pub fn add_patient(&mut self, new: NewPatient) -> ClinicResult<Patient> {
        if new.professional_id.trim().is_empty() {
            return Err(ClinicError::NoPractitionerSelected);
        }
        if self.practitioner(&new.professional_id).is_none() {
            return Err(ClinicError::PractitionerNotFound(new.professional_id));
        }

        let mut patient = Patient::new(
            self.ids.next_id(),
            new.name,
            new.guardian_name,
            new.birth_date,
        );
        patient.professional_id = Some(new.professional_id);
        patient.phone = new.phone;

        let mut next = self.patients.clone();
        next.push(patient.clone());
        self.commit_patients(next)?;
        Ok(patient)
    }

    /// Update a patient's registration fields.
    pub fn edit_patient(&mut self, id: u64, edit: PatientEdit) -> ClinicResult<Patient> {
        if self.practitioner(&edit.professional_id).is_none() {
            return Err(ClinicError::PractitionerNotFound(edit.professional_id));
        }
        let current = self.patient(id).ok_or(ClinicError::PatientNotFound(id))?;

        let updated = Patient {
            name: edit.name,
            guardian_name: edit.guardian_name,
            birth_date: edit.birth_date,
            professional_id: Some(edit.professional_id),
            phone: edit.phone,
            ..current.clone()
        };

        let next = self
            .patients
            .iter()
            .map(|p| if p.id == id { updated.clone() } else { p.clone() })
            .collect();
        self.commit_patients(next)?;
        Ok(updated)
    }

    /// Remove one patient.
    pub fn remove_patient(&mut self, id: u64) -> ClinicResult<()> {
        if self.patient(id).is_none() {
            return Err(ClinicError::PatientNotFound(id));
        }
        let next = self
            .patients
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.commit_patients(next)
    }

    /// Remove every patient in `ids`; returns how many were removed.
    pub fn remove_patients(&mut self, ids: &[u64]) -> ClinicResult<usize> {
        let next: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| !ids.contains(&p.id))
            .cloned()
            .collect();
        let removed = self.patients.len() - next.len();
        self.commit_patients(next)?;
        Ok(removed)
    }

    // =========================================================================
    // Check-in and Import
    // =========================================================================

    /// Record a visit, scheduling the follow-up from the age at the visit
    /// date.
    pub fn check_in(
        &mut self,
        id: u64,
        visit_date: NaiveDate,
        visit_time: Option<NaiveTime>,
    ) -> ClinicResult<Patient> {
        let current = self.patient(id).ok_or(ClinicError::PatientNotFound(id))?;
        let updated = schedule::apply_checkin(current, visit_date, visit_time);

        let next = self
            .patients
            .iter()
            .map(|p| if p.id == id { updated.clone() } else { p.clone() })
            .collect();
        self.commit_patients(next)?;
        Ok(updated)
    }

    /// Import a parsed roster, appending the usable rows.
    pub fn import_roster(&mut self, rows: &[RosterRow]) -> ClinicResult<ImportOutcome> {
        let outcome = importer::import_rows(rows, &self.practitioners, &mut self.ids)?;

        let mut next = self.patients.clone();
        next.extend(outcome.patients.iter().cloned());
        self.commit_patients(next)?;

        debug!(
            imported = outcome.imported(),
            skipped = outcome.skipped,
            "roster import applied"
        );
        Ok(outcome)
    }

    // =========================================================================
    // Read-side Derivations
    // =========================================================================

    /// Patients passing every criterion of `filter`, in roster order.
    pub fn filtered_patients(&self, filter: &PatientFilter) -> Vec<&Patient> {
        let needle = filter
            .search
            .as_ref()
            .map(|s| s.to_lowercase())
            .filter(|s| !s.is_empty());

        self.patients
            .iter()
            .filter(|p| {
                let matches_search = needle.as_ref().map_or(true, |needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.guardian_name.to_lowercase().contains(needle)
                });
                let matches_professional = filter
                    .professional_id
                    .as_ref()
                    .map_or(true, |id| p.professional_id.as_deref() == Some(id.as_str()));
                let matches_checkin = match filter.checkin {
                    CheckinFilter::All => true,
                    CheckinFilter::Done => p.last_checkin.is_some(),
                    CheckinFilter::Pending => p.last_checkin.is_none(),
                };
                matches_search && matches_professional && matches_checkin
            })
            .collect()
    }

    /// Derived display fields for a patient as of `today`.
    pub fn patient_overview(&self, id: u64, today: NaiveDate) -> ClinicResult<PatientOverview> {
        let patient = self.patient(id).ok_or(ClinicError::PatientNotFound(id))?;
        let age = schedule::age_info(patient.birth_date, today);
        Ok(PatientOverview {
            age,
            frequency: schedule::required_frequency(age.months),
            food_introduction_alert: schedule::food_introduction_alert(age.months, age.days),
            quarterly_reminder: schedule::quarterly_reminder_applies(age.months),
        })
    }

    /// Confirmation message for a patient's appointment.
    ///
    /// Requires at least one recorded or scheduled visit; otherwise the
    /// operation aborts with no message generated.
    pub fn confirmation_message(
        &self,
        id: u64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ClinicResult<String> {
        let patient = self.patient(id).ok_or(ClinicError::PatientNotFound(id))?;
        if patient.last_checkin.is_none() && patient.next_checkin.is_none() {
            return Err(ClinicError::NoVisitScheduled(patient.name.clone()));
        }

        let practitioner_name = patient
            .professional_id
            .as_deref()
            .and_then(|pid| self.practitioner(pid))
            .map(|p| p.name.as_str())
            .unwrap_or(messaging::UNASSIGNED_PRACTITIONER);

        Ok(messaging::confirmation_message(
            &patient.guardian_name,
            &patient.name,
            practitioner_name,
            date,
            time,
        ))
    }

    // =========================================================================
    // Notes
    // =========================================================================

    /// Add an open note.
    pub fn add_note(&mut self, text: &str) -> ClinicResult<Note> {
        let note = Note::new(text.to_string());
        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit_notes(next)?;
        Ok(note)
    }

    /// Flip a note's completed flag. Unknown ids leave the list as-is.
    pub fn toggle_note(&mut self, id: &str) -> ClinicResult<()> {
        let next = self
            .notes
            .iter()
            .map(|n| {
                if n.id == id {
                    Note {
                        completed: !n.completed,
                        ..n.clone()
                    }
                } else {
                    n.clone()
                }
            })
            .collect();
        self.commit_notes(next)
    }

    /// Delete a note.
    pub fn remove_note(&mut self, id: &str) -> ClinicResult<()> {
        let next = self.notes.iter().filter(|n| n.id != id).cloned().collect();
        self.commit_notes(next)
    }

    // =========================================================================
    // Commit Helpers
    // =========================================================================

    fn commit_patients(&mut self, next: Vec<Patient>) -> ClinicResult<()> {
        store::save_slot(self.store.as_mut(), PATIENTS_SLOT, &next)?;
        self.patients = next;
        Ok(())
    }

    fn commit_practitioners(&mut self, next: Vec<Practitioner>) -> ClinicResult<()> {
        store::save_slot(self.store.as_mut(), PRACTITIONERS_SLOT, &next)?;
        self.practitioners = next;
        Ok(())
    }

    fn commit_notes(&mut self, next: Vec<Note>) -> ClinicResult<()> {
        store::save_slot(self.store.as_mut(), NOTES_SLOT, &next)?;
        self.notes = next;
        Ok(())
    }
}
