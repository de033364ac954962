//! Free-form practice notes.

use serde::{Deserialize, Serialize};

/// A sidebar note / to-do entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Opaque unique id
    pub id: String,
    /// Note text
    pub text: String,
    /// Whether the item has been ticked off
    pub completed: bool,
}

impl Note {
    /// Create an open note with a fresh id.
    pub fn new(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            completed: false,
        }
    }
}
