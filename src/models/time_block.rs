use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::{TimeInterval, TimeOfDay};

/// Administrative time block (meeting, holiday). An empty `user_ids` means
/// the block applies unit-wide; otherwise only to the listed staff members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub title: String,
    pub user_ids: Vec<Uuid>,
}

impl TimeBlock {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start_time, self.end_time)
    }

    /// Whether this block applies to the given staff member.
    pub fn applies_to(&self, user_id: Uuid) -> bool {
        self.user_ids.is_empty() || self.user_ids.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_list_applies_unit_wide() {
        let block = TimeBlock {
            id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: TimeOfDay::from_hm(12, 0).unwrap(),
            end_time: TimeOfDay::from_hm(13, 0).unwrap(),
            title: "Team meeting".into(),
            user_ids: vec![],
        };
        assert!(block.applies_to(Uuid::new_v4()));

        let member = Uuid::new_v4();
        let scoped = TimeBlock {
            user_ids: vec![member],
            ..block
        };
        assert!(scoped.applies_to(member));
        assert!(!scoped.applies_to(Uuid::new_v4()));
    }
}
