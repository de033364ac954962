//! Loosely-typed roster rows and header-alias field lookup.
//!
//! The external spreadsheet parser delivers rows as header → cell maps
//! with untyped cells. Lookup is case-insensitive over an explicit alias
//! list per field and reports absence explicitly instead of defaulting.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Accepted header spellings for the patient name.
pub const NAME_ALIASES: &[&str] = &["nome", "paciente", "name", "patient"];
/// Accepted header spellings for the guardian name.
pub const GUARDIAN_ALIASES: &[&str] = &["responsável", "responsavel", "pai/mãe", "guardian"];
/// Accepted header spellings for the birth date.
pub const BIRTH_DATE_ALIASES: &[&str] =
    &["data de nascimento", "nascimento", "birthdate", "birth date"];
/// Accepted header spellings for the practitioner reference.
pub const PRACTITIONER_ALIASES: &[&str] = &["dra", "médica", "medica", "profissional", "doctor"];
/// Accepted header spellings for the contact phone.
pub const PHONE_ALIASES: &[&str] = &["telefone", "celular", "contato", "whatsapp", "phone"];

/// A single spreadsheet cell as delivered by the external parser.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Number(f64),
}

impl CellValue {
    /// The cell rendered as display text.
    ///
    /// Whole numbers drop the trailing `.0` so phone columns imported as
    /// numerics keep their digits.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    /// The cell interpreted as a calendar date, time-of-day discarded.
    ///
    /// Strings accept `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`, and
    /// `DD/MM/YYYY`; anything else is unresolved.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(date) => Some(*date),
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(text) => parse_date_text(text),
            CellValue::Number(_) => None,
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// One imported row: header → cell, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RosterRow {
    cells: HashMap<String, CellValue>,
}

impl RosterRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, cell)` pairs.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        let mut row = Self::new();
        for (header, value) in cells {
            row.insert(&header, value);
        }
        row
    }

    /// Add a cell; headers are normalized to lowercase.
    pub fn insert(&mut self, header: &str, value: CellValue) {
        self.cells.insert(header.trim().to_lowercase(), value);
    }

    /// The first cell present under any of `aliases`.
    ///
    /// `None` marks the field absent; callers decide on defaults.
    pub fn field(&self, aliases: &[&str]) -> Option<&CellValue> {
        aliases.iter().find_map(|alias| self.cells.get(*alias))
    }
}
