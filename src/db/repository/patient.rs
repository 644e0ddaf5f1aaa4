use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Patient;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, last_visit) VALUES (?1, ?2, ?3)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.last_visit.map(|d| d.to_string()),
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let result = conn.query_row(
        "SELECT id, name, last_visit FROM patients WHERE id = ?1",
        params![id.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        },
    );

    match result {
        Ok((id, name, last_visit)) => Ok(Some(Patient {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            name,
            last_visit: last_visit
                .as_deref()
                .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
                .transpose()
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The "last visit" write issued by the Completed transition. Fails with
/// NotFound when the patient record is missing, which aborts the enclosing
/// transaction.
pub fn set_last_visit(
    conn: &Connection,
    patient_id: &Uuid,
    date: NaiveDate,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET last_visit = ?1 WHERE id = ?2",
        params![date.to_string(), patient_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: patient_id.to_string(),
        });
    }
    Ok(())
}
