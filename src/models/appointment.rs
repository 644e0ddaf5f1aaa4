use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;
use crate::interval::{TimeInterval, TimeOfDay};

/// A persisted clinical appointment.
///
/// `patient_name` and `professional_name` are denormalized display copies
/// refreshed only at transition time; the authoritative records live in the
/// external directories. `date`, `time` and `end_time` are immutable after
/// creation except through an explicit reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub professional_name: String,
    pub unit_id: Uuid,
    pub room: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: AppointmentStatus,
    /// Present iff this appointment is one participant-slot of a group session.
    pub group_id: Option<String>,
    pub health_plan_id: Option<Uuid>,
    /// Rendering hint assigned at creation; shared across one recurrence series.
    pub color: String,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.time, self.end_time)
    }
}

/// Everything the operator supplies when booking: the recurrence expander
/// adds identity, status, color and timestamps per instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub professional_name: String,
    pub unit_id: Uuid,
    pub room: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub group_id: Option<String>,
    pub health_plan_id: Option<Uuid>,
}

impl AppointmentDraft {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.time, self.end_time)
    }
}
