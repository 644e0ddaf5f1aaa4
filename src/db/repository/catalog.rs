use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;

/// Unit/room catalog reads used for creation-time validation. The catalog is
/// maintained by the administration screens, not by this core.
pub fn insert_unit(conn: &Connection, id: &Uuid, name: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO units (id, name) VALUES (?1, ?2)",
        params![id.to_string(), name],
    )?;
    Ok(())
}

pub fn insert_room(conn: &Connection, unit_id: &Uuid, name: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO rooms (unit_id, name) VALUES (?1, ?2)",
        params![unit_id.to_string(), name],
    )?;
    Ok(())
}

pub fn unit_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM units WHERE id = ?1",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn room_exists(conn: &Connection, unit_id: &Uuid, room: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM rooms WHERE unit_id = ?1 AND name = ?2",
        params![unit_id.to_string(), room],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
