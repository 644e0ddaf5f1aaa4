use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::SlotType;
use crate::interval::{TimeInterval, TimeOfDay};

/// Weekly availability slot for one staff member. Owned by the staff module;
/// this core only reads them for the day view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub unit_id: Uuid,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub slot_type: SlotType,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilitySlot {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start_time, self.end_time)
    }
}
