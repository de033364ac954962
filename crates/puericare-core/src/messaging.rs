//! Human-readable output: confirmation messages and display formatting.
//!
//! Pure formatting only; nothing here talks to a transport. Sending a
//! message (clipboard, WhatsApp deep link) is the UI shell's concern.

use chrono::{NaiveDate, NaiveTime};

use crate::schedule::AgeInfo;

/// Display name used when a patient has no assigned practitioner.
pub const UNASSIGNED_PRACTITIONER: &str = "Dra. Responsável";

/// Fixed-template appointment confirmation addressed to the guardian.
///
/// The date renders in `DD/MM/YYYY` form, the time as `HH:MM`.
pub fn confirmation_message(
    guardian_name: &str,
    patient_name: &str,
    practitioner_name: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> String {
    format!(
        "Olá {guardian}! Tudo bem? 😊\n\n\
         Posso confirmar a consulta do(a) {patient} no dia {date} às {time} com a {practitioner}?\n\n\
         Ficamos à disposição para qualquer dúvida!\n\n\
         Atenciosamente,\nEquipe Espaço da Ped",
        guardian = guardian_name,
        patient = patient_name,
        date = date.format("%d/%m/%Y"),
        time = time.format("%H:%M"),
        practitioner = practitioner_name,
    )
}

/// Age rendered the way the roster displays it: days alone under one
/// month, months and days under a year, years and months beyond.
pub fn format_age(age: AgeInfo) -> String {
    if age.months < 1 {
        format!("{} dias", age.days)
    } else if age.months < 12 {
        if age.days > 0 {
            format!("{} meses e {} dias", age.months, age.days)
        } else {
            format!("{} meses", age.months)
        }
    } else {
        let years = age.months / 12;
        let months = age.months % 12;
        let mut out = format!("{} ano{}", years, if years > 1 { "s" } else { "" });
        if months > 0 {
            out.push_str(&format!(" e {} meses", months));
        }
        out
    }
}

/// Strip a phone number down to its digits (WhatsApp link form).
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}
