use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::interval::TimeOfDay;
use crate::models::{Appointment, AppointmentStatus};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, patient_name, professional_name, unit_id,
         room, date, time, end_time, status, group_id, health_plan_id, color, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.patient_name,
            appt.professional_name,
            appt.unit_id.to_string(),
            appt.room,
            appt.date.to_string(),
            appt.time.to_string(),
            appt.end_time.to_string(),
            appt.status.as_str(),
            appt.group_id,
            appt.health_plan_id.map(|id| id.to_string()),
            appt.color,
            appt.created_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, patient_name, professional_name, unit_id, room,
         date, time, end_time, status, group_id, health_plan_id, color, created_at
         FROM appointments WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], map_row);
    match result {
        Ok(row) => Ok(Some(appointment_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Appointments for one unit and date, or across all units when `unit_id` is
/// None. Ordered by start time, then creation time.
pub fn list_for_day(
    conn: &Connection,
    unit_id: Option<&Uuid>,
    date: NaiveDate,
) -> Result<Vec<Appointment>, DatabaseError> {
    const BASE: &str = "SELECT id, patient_id, patient_name, professional_name, unit_id, room,
         date, time, end_time, status, group_id, health_plan_id, color, created_at
         FROM appointments WHERE date = ?1";

    let mut appointments = Vec::new();
    match unit_id {
        Some(unit) => {
            let mut stmt =
                conn.prepare(&format!("{BASE} AND unit_id = ?2 ORDER BY time, created_at"))?;
            let rows =
                stmt.query_map(params![date.to_string(), unit.to_string()], map_row)?;
            for row in rows {
                appointments.push(appointment_from_row(row?)?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!("{BASE} ORDER BY time, created_at"))?;
            let rows = stmt.query_map(params![date.to_string()], map_row)?;
            for row in rows {
                appointments.push(appointment_from_row(row?)?);
            }
        }
    }
    Ok(appointments)
}

pub fn update_status(
    conn: &Connection,
    id: &Uuid,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Appointment".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Removes the single record; group siblings and clinical notes are untouched.
pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Appointment".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for Appointment mapping
struct AppointmentRow {
    id: String,
    patient_id: String,
    patient_name: String,
    professional_name: String,
    unit_id: String,
    room: String,
    date: String,
    time: String,
    end_time: String,
    status: String,
    group_id: Option<String>,
    health_plan_id: Option<String>,
    color: String,
    created_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        professional_name: row.get(3)?,
        unit_id: row.get(4)?,
        room: row.get(5)?,
        date: row.get(6)?,
        time: row.get(7)?,
        end_time: row.get(8)?,
        status: row.get(9)?,
        group_id: row.get(10)?,
        health_plan_id: row.get(11)?,
        color: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        patient_name: row.patient_name,
        professional_name: row.professional_name,
        unit_id: parse_uuid(&row.unit_id)?,
        room: row.room,
        date: NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        time: TimeOfDay::from_str(&row.time)?,
        end_time: TimeOfDay::from_str(&row.end_time)?,
        status: AppointmentStatus::from_str(&row.status)?,
        group_id: row.group_id,
        health_plan_id: row.health_plan_id.as_deref().map(parse_uuid).transpose()?,
        color: row.color,
        created_at: NaiveDateTime::parse_from_str(&row.created_at, DATETIME_FMT)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
    })
}
