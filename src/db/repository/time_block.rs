use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::interval::TimeOfDay;
use crate::models::TimeBlock;

/// Insert a block and its per-user scope rows. The caller provides the
/// transaction boundary when one is needed.
pub fn insert_time_block(conn: &Connection, block: &TimeBlock) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO time_blocks (id, unit_id, date, start_time, end_time, title)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            block.id.to_string(),
            block.unit_id.to_string(),
            block.date.to_string(),
            block.start_time.to_string(),
            block.end_time.to_string(),
            block.title,
        ],
    )?;
    for user_id in &block.user_ids {
        conn.execute(
            "INSERT INTO time_block_users (block_id, user_id) VALUES (?1, ?2)",
            params![block.id.to_string(), user_id.to_string()],
        )?;
    }
    Ok(())
}

/// Blocks for one unit and date (or all units), with their user scopes.
pub fn list_for_day(
    conn: &Connection,
    unit_id: Option<&Uuid>,
    date: NaiveDate,
) -> Result<Vec<TimeBlock>, DatabaseError> {
    const BASE: &str =
        "SELECT id, unit_id, date, start_time, end_time, title FROM time_blocks WHERE date = ?1";

    type BlockRow = (String, String, String, String, String, String);
    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BlockRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    let mut raw: Vec<BlockRow> = Vec::new();
    match unit_id {
        Some(unit) => {
            let mut stmt =
                conn.prepare(&format!("{BASE} AND unit_id = ?2 ORDER BY start_time"))?;
            let rows = stmt.query_map(params![date.to_string(), unit.to_string()], map_row)?;
            for row in rows {
                raw.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!("{BASE} ORDER BY start_time"))?;
            let rows = stmt.query_map(params![date.to_string()], map_row)?;
            for row in rows {
                raw.push(row?);
            }
        }
    }

    let mut blocks = Vec::with_capacity(raw.len());
    for (id, unit_id, date, start_time, end_time, title) in raw {
        let user_ids = list_block_users(conn, &id)?;
        blocks.push(TimeBlock {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            unit_id: Uuid::parse_str(&unit_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            start_time: TimeOfDay::from_str(&start_time)?,
            end_time: TimeOfDay::from_str(&end_time)?,
            title,
            user_ids,
        });
    }
    Ok(blocks)
}

fn list_block_users(conn: &Connection, block_id: &str) -> Result<Vec<Uuid>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT user_id FROM time_block_users WHERE block_id = ?1 ORDER BY user_id")?;
    let rows = stmt.query_map(params![block_id], |row| row.get::<_, String>(0))?;

    let mut users = Vec::new();
    for row in rows {
        users.push(
            Uuid::parse_str(&row?)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        );
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn block(unit: Uuid, date: NaiveDate, users: Vec<Uuid>) -> TimeBlock {
        TimeBlock {
            id: Uuid::new_v4(),
            unit_id: unit,
            date,
            start_time: TimeOfDay::from_hm(12, 0).unwrap(),
            end_time: TimeOfDay::from_hm(13, 0).unwrap(),
            title: "Team meeting".into(),
            user_ids: users,
        }
    }

    #[test]
    fn insert_and_list_round_trip() {
        let conn = open_memory_database().unwrap();
        let unit = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let users = vec![Uuid::new_v4(), Uuid::new_v4()];

        insert_time_block(&conn, &block(unit, date, users.clone())).unwrap();
        insert_time_block(&conn, &block(unit, date, vec![])).unwrap();

        let blocks = list_for_day(&conn, Some(&unit), date).unwrap();
        assert_eq!(blocks.len(), 2);
        let with_users = blocks.iter().find(|b| !b.user_ids.is_empty()).unwrap();
        assert_eq!(with_users.user_ids.len(), 2);
        for u in &users {
            assert!(with_users.user_ids.contains(u));
        }
    }

    #[test]
    fn list_scopes_by_unit_and_date() {
        let conn = open_memory_database().unwrap();
        let unit_a = Uuid::new_v4();
        let unit_b = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        insert_time_block(&conn, &block(unit_a, date, vec![])).unwrap();
        insert_time_block(&conn, &block(unit_b, date, vec![])).unwrap();
        insert_time_block(
            &conn,
            &block(unit_a, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(), vec![]),
        )
        .unwrap();

        assert_eq!(list_for_day(&conn, Some(&unit_a), date).unwrap().len(), 1);
        assert_eq!(list_for_day(&conn, None, date).unwrap().len(), 2);
    }
}
