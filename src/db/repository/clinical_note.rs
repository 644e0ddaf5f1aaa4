use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::ClinicalNote;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn insert_note(conn: &Connection, note: &ClinicalNote) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO clinical_notes (id, patient_id, title, body, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            note.id.to_string(),
            note.patient_id.to_string(),
            note.title,
            note.body,
            note.created_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

/// Notes for one patient, newest first.
pub fn list_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<ClinicalNote>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, title, body, created_at
         FROM clinical_notes WHERE patient_id = ?1
         ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut notes = Vec::new();
    for row in rows {
        let (id, patient_id, title, body, created_at) = row?;
        notes.push(ClinicalNote {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            patient_id: Uuid::parse_str(&patient_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            title,
            body,
            created_at: NaiveDateTime::parse_from_str(&created_at, DATETIME_FMT)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        });
    }
    Ok(notes)
}

pub fn count_for_patient(conn: &Connection, patient_id: &Uuid) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM clinical_notes WHERE patient_id = ?1",
        params![patient_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}
