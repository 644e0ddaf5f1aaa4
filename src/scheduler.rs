//! Scheduling repository facade.
//!
//! The only component that issues writes. Status transitions and recurrence
//! batches go through SQLite transactions so that a transition's side effects
//! (status flip, patient last-visit stamp, clinical note) are indivisible: a
//! caller never observes a status flip without its required side effects.
//! Reads go through [`Scheduler::load_day`], the single read path into
//! persisted appointments, time blocks and availability.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::authorization::{self, Capability};
use crate::db::repository::{appointment, availability, catalog, clinical_note, patient};
use crate::db::repository::time_block;
use crate::db::{self, DatabaseError};
use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, AvailabilitySlot, ClinicalNote, Role,
    TimeBlock,
};
use crate::recurrence;
use crate::state_machine::{self, Transition};

/// Errors returned synchronously from every facade operation. The core never
/// retries or recovers silently.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("invalid transition: appointment is already {from}")]
    InvalidTransition { from: AppointmentStatus },

    /// The atomic multi-record write failed to commit; surfaced as-is.
    #[error("commit failed: {0}")]
    Conflict(String),

    #[error("operation not permitted for role {role}")]
    Forbidden { role: Role },

    #[error("database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for SchedulingError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            other => Self::Database(other),
        }
    }
}

/// Point-in-time snapshot of one unit's day (or every unit's, for the
/// administrative view). Input to aggregation and layout.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub appointments: Vec<Appointment>,
    pub time_blocks: Vec<TimeBlock>,
    pub availability: Vec<AvailabilitySlot>,
}

pub struct Scheduler {
    conn: Connection,
}

impl Scheduler {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (and migrate) the scheduling database at `path`.
    pub fn open(path: &Path) -> Result<Self, SchedulingError> {
        Ok(Self::new(db::open_database(path)?))
    }

    /// In-memory scheduler, for tests.
    pub fn in_memory() -> Result<Self, SchedulingError> {
        Ok(Self::new(db::open_memory_database()?))
    }

    /// Direct connection access for the collaborator modules (patient
    /// directory, catalog, staff availability) that seed data this core
    /// only reads.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Validate a booking and persist its recurrence expansion: one instance,
    /// or four at 7-day steps when `repeat` is set. All instances commit in
    /// one transaction; a partial failure persists nothing and is reported.
    ///
    /// Deliberately does not check for double-booked rooms or professionals,
    /// matching the reference behavior: only the unit's configured room list
    /// gates creation.
    pub fn create_appointment(
        &mut self,
        role: Role,
        draft: &AppointmentDraft,
        repeat: bool,
    ) -> Result<Vec<Uuid>, SchedulingError> {
        authorization::require(role, Capability::Create)?;
        validate_draft(&self.conn, draft)?;

        let instances = recurrence::expand(draft, repeat);

        let tx = self
            .conn
            .transaction()
            .map_err(|e| SchedulingError::Conflict(e.to_string()))?;
        for instance in &instances {
            appointment::insert_appointment(&tx, instance)?;
        }
        tx.commit()
            .map_err(|e| SchedulingError::Conflict(e.to_string()))?;

        let ids: Vec<Uuid> = instances.iter().map(|a| a.id).collect();
        tracing::info!(
            count = ids.len(),
            patient = %draft.patient_id,
            date = %draft.date,
            repeat,
            "appointments created"
        );
        Ok(ids)
    }

    /// Apply a status transition. The state machine validates and derives the
    /// side-effect plan; every write in the plan commits atomically or not at
    /// all, so a commit failure leaves the appointment in its prior state.
    pub fn apply_transition(
        &mut self,
        role: Role,
        id: &Uuid,
        transition: &Transition,
    ) -> Result<Uuid, SchedulingError> {
        authorization::require(role, Capability::Transition)?;

        let appt = appointment::get_appointment(&self.conn, id)?.ok_or_else(|| {
            SchedulingError::NotFound {
                entity: "Appointment".into(),
                id: id.to_string(),
            }
        })?;

        let plan = state_machine::plan(appt.status, transition)?;

        let tx = self
            .conn
            .transaction()
            .map_err(|e| SchedulingError::Conflict(e.to_string()))?;
        appointment::update_status(&tx, id, plan.new_status)?;
        if plan.set_last_visit {
            patient::set_last_visit(&tx, &appt.patient_id, appt.date)?;
        }
        if let Some(note) = &plan.note {
            clinical_note::insert_note(
                &tx,
                &ClinicalNote {
                    id: Uuid::new_v4(),
                    patient_id: appt.patient_id,
                    title: note.title.clone(),
                    body: note.body.clone(),
                    created_at: chrono::Local::now().naive_local(),
                },
            )?;
        }
        tx.commit()
            .map_err(|e| SchedulingError::Conflict(e.to_string()))?;

        tracing::info!(
            appointment = %id,
            status = %plan.new_status,
            with_note = plan.note.is_some(),
            "transition applied"
        );
        Ok(*id)
    }

    /// Remove a single appointment record. No cascade: group siblings and
    /// existing clinical notes stay. Non-administrative roles may delete only
    /// while the appointment is still Scheduled.
    pub fn delete_appointment(&mut self, role: Role, id: &Uuid) -> Result<(), SchedulingError> {
        authorization::require(role, Capability::Delete)?;

        let appt = appointment::get_appointment(&self.conn, id)?.ok_or_else(|| {
            SchedulingError::NotFound {
                entity: "Appointment".into(),
                id: id.to_string(),
            }
        })?;
        if !state_machine::can_delete(appt.status, role) {
            return Err(SchedulingError::Forbidden { role });
        }

        appointment::delete_appointment(&self.conn, id)?;
        tracing::info!(appointment = %id, status = %appt.status, "appointment deleted");
        Ok(())
    }

    /// All three collections for one unit and date; `unit_id` None is the
    /// administrative all-units view. Availability comes from the weekly grid
    /// for the date's weekday (0 = Sunday).
    pub fn load_day(
        &self,
        role: Role,
        unit_id: Option<&Uuid>,
        date: NaiveDate,
    ) -> Result<DaySchedule, SchedulingError> {
        if unit_id.is_none() {
            authorization::require(role, Capability::ViewAllUnits)?;
        }

        let day_of_week = date.weekday().num_days_from_sunday() as u8;
        Ok(DaySchedule {
            appointments: appointment::list_for_day(&self.conn, unit_id, date)?,
            time_blocks: time_block::list_for_day(&self.conn, unit_id, date)?,
            availability: availability::list_for_weekday(&self.conn, unit_id, day_of_week)?,
        })
    }
}

fn validate_draft(conn: &Connection, draft: &AppointmentDraft) -> Result<(), SchedulingError> {
    if !draft.interval().is_valid() {
        return Err(SchedulingError::Validation(
            "end time must be after start time".into(),
        ));
    }
    if draft.patient_name.trim().is_empty() {
        return Err(SchedulingError::Validation("patient name is required".into()));
    }
    if draft.room.trim().is_empty() {
        return Err(SchedulingError::Validation("room is required".into()));
    }
    if !catalog::unit_exists(conn, &draft.unit_id)? {
        return Err(SchedulingError::Validation(format!(
            "unknown unit {}",
            draft.unit_id
        )));
    }
    if !catalog::room_exists(conn, &draft.unit_id, &draft.room)? {
        return Err(SchedulingError::Validation(format!(
            "unknown room {:?} for unit {}",
            draft.room, draft.unit_id
        )));
    }
    Ok(())
}
