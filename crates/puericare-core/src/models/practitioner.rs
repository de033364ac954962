//! Practitioner records.

use serde::{Deserialize, Serialize};

/// A clinician patients are assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Practitioner {
    /// Opaque unique id
    pub id: String,
    /// Display name, e.g. "Dra. Silva"
    pub name: String,
}

impl Practitioner {
    /// Create a practitioner with a fresh id.
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
        }
    }
}
