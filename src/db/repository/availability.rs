use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::interval::TimeOfDay;
use crate::models::{AvailabilitySlot, SlotType};

/// Seed-only write; availability is owned by the staff module.
pub fn insert_slot(conn: &Connection, slot: &AvailabilitySlot) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO availability_slots (id, user_id, unit_id, day_of_week, type, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            slot.id.to_string(),
            slot.user_id.to_string(),
            slot.unit_id.to_string(),
            slot.day_of_week,
            slot.slot_type.as_str(),
            slot.start_time.to_string(),
            slot.end_time.to_string(),
        ],
    )?;
    Ok(())
}

/// Weekly slots falling on the given weekday (0 = Sunday), for one unit or
/// all units.
pub fn list_for_weekday(
    conn: &Connection,
    unit_id: Option<&Uuid>,
    day_of_week: u8,
) -> Result<Vec<AvailabilitySlot>, DatabaseError> {
    const BASE: &str = "SELECT id, user_id, unit_id, day_of_week, type, start_time, end_time
         FROM availability_slots WHERE day_of_week = ?1";

    type SlotRow = (String, String, String, u8, String, String, String);
    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SlotRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
        ))
    }

    let mut raw: Vec<SlotRow> = Vec::new();
    match unit_id {
        Some(unit) => {
            let mut stmt =
                conn.prepare(&format!("{BASE} AND unit_id = ?2 ORDER BY start_time"))?;
            let rows = stmt.query_map(params![day_of_week, unit.to_string()], map_row)?;
            for row in rows {
                raw.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!("{BASE} ORDER BY start_time"))?;
            let rows = stmt.query_map(params![day_of_week], map_row)?;
            for row in rows {
                raw.push(row?);
            }
        }
    }

    let mut slots = Vec::with_capacity(raw.len());
    for (id, user_id, unit_id, day_of_week, slot_type, start_time, end_time) in raw {
        slots.push(AvailabilitySlot {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            unit_id: Uuid::parse_str(&unit_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            day_of_week,
            slot_type: SlotType::from_str(&slot_type)?,
            start_time: TimeOfDay::from_str(&start_time)?,
            end_time: TimeOfDay::from_str(&end_time)?,
        });
    }
    Ok(slots)
}
