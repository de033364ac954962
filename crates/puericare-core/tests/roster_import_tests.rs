//! Roster import integration tests.

use anyhow::Result;
use chrono::NaiveDate;
use puericare_core::importer::{
    import_rows, CellValue, ImportError, MatchMethod, PatientIdAllocator, RosterRow,
};
use puericare_core::models::Practitioner;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn text_row(cells: &[(&str, &str)]) -> RosterRow {
    RosterRow::from_cells(
        cells
            .iter()
            .map(|(header, value)| (header.to_string(), CellValue::Text(value.to_string()))),
    )
}

fn silva() -> Vec<Practitioner> {
    vec![Practitioner {
        id: "1".into(),
        name: "Dra. Silva".into(),
    }]
}

#[test]
fn import_with_no_practitioners_creates_nothing() {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let rows = vec![text_row(&[("Nome", "Ana"), ("Nascimento", "2023-01-01")])];

    let result = import_rows(&rows, &[], &mut ids);
    assert!(matches!(result, Err(ImportError::NoPractitioners)));
}

#[test]
fn import_portuguese_headers_with_practitioner_match() -> Result<()> {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let rows = vec![text_row(&[
        ("Nome", "Ana"),
        ("Nascimento", "2023-01-01"),
        ("Dra", "Silva"),
    ])];

    let outcome = import_rows(&rows, &silva(), &mut ids)?;
    assert_eq!(outcome.imported(), 1);

    let patient = &outcome.patients[0];
    assert_eq!(patient.name, "Ana");
    assert_eq!(patient.guardian_name, "N/A");
    assert_eq!(patient.birth_date, date(2023, 1, 1));
    assert_eq!(patient.professional_id.as_deref(), Some("1"));
    assert_eq!(outcome.matches[0].method, MatchMethod::Named);
    Ok(())
}

#[test]
fn import_row_missing_name_is_dropped() -> Result<()> {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let rows = vec![
        text_row(&[("Responsável", "Mãe"), ("Nascimento", "2023-01-01")]),
        text_row(&[("Nome", "Ana"), ("Nascimento", "2023-01-01")]),
    ];

    let outcome = import_rows(&rows, &silva(), &mut ids)?;
    assert_eq!(outcome.imported(), 1);
    assert_eq!(outcome.skipped, 1);
    assert!(outcome.patients.iter().all(|p| p.name == "Ana"));
    Ok(())
}

#[test]
fn import_native_date_and_datetime_cells() -> Result<()> {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let birth_dt = date(2022, 11, 5).and_hms_opt(8, 15, 0).unwrap();
    let rows = vec![
        RosterRow::from_cells([
            ("Nome".to_string(), CellValue::Text("Bia".into())),
            (
                "Data de Nascimento".to_string(),
                CellValue::Date(date(2022, 11, 5)),
            ),
        ]),
        RosterRow::from_cells([
            ("Nome".to_string(), CellValue::Text("Caio".into())),
            ("Nascimento".to_string(), CellValue::DateTime(birth_dt)),
        ]),
    ];

    let outcome = import_rows(&rows, &silva(), &mut ids)?;
    assert_eq!(outcome.imported(), 2);
    assert!(outcome
        .patients
        .iter()
        .all(|p| p.birth_date == date(2022, 11, 5)));
    Ok(())
}

#[test]
fn import_brazilian_date_strings_and_numeric_phones() -> Result<()> {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let rows = vec![RosterRow::from_cells([
        ("Nome".to_string(), CellValue::Text("Davi".into())),
        ("Nascimento".to_string(), CellValue::Text("25/12/2022".into())),
        ("Whatsapp".to_string(), CellValue::Number(11999990000.0)),
    ])];

    let outcome = import_rows(&rows, &silva(), &mut ids)?;
    let patient = &outcome.patients[0];
    assert_eq!(patient.birth_date, date(2022, 12, 25));
    assert_eq!(patient.phone, "11999990000");
    Ok(())
}

#[test]
fn import_preserves_order_with_fresh_ids() -> Result<()> {
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let names = ["Ana", "Bia", "Caio", "Davi"];
    let rows: Vec<RosterRow> = names
        .into_iter()
        .map(|name| text_row(&[("Nome", name), ("Nascimento", "2023-05-05")]))
        .collect();

    let outcome = import_rows(&rows, &silva(), &mut ids)?;
    let imported: Vec<&str> = outcome.patients.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(imported, names);
    assert!(outcome.patients.windows(2).all(|w| w[0].id < w[1].id));
    Ok(())
}

#[test]
fn unmatched_practitioner_falls_back_with_suggestion() -> Result<()> {
    let practitioners = vec![
        Practitioner {
            id: "p1".into(),
            name: "Dra. Ana Souza".into(),
        },
        Practitioner {
            id: "p2".into(),
            name: "Dra. Beatriz Lima".into(),
        },
    ];
    let mut ids = PatientIdAllocator::seeded_from(&[]);
    let rows = vec![text_row(&[
        ("Nome", "Davi"),
        ("Nascimento", "2023-05-05"),
        ("Profissional", "Dra. Beatris Lima"),
    ])];

    let outcome = import_rows(&rows, &practitioners, &mut ids)?;
    // Assignment falls back to the first practitioner...
    assert_eq!(outcome.patients[0].professional_id.as_deref(), Some("p1"));
    // ...while the report points at the likely intended one.
    match &outcome.matches[0].method {
        MatchMethod::Fallback { suggestion } => {
            assert_eq!(suggestion.as_deref(), Some("Dra. Beatriz Lima"));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    Ok(())
}
