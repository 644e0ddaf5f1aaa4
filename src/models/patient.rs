use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient directory record as seen by this core: the `Completed` transition
/// writes `last_visit`, nothing else here is owned by scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub last_visit: Option<NaiveDate>,
}

/// Clinical note created atomically by the completed-with-note transition.
/// The note store is append-only from this core's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalNote {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}
