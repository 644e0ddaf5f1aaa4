//! Weekly recurrence expansion.
//!
//! A booking marked as repeating produces four instances: the given date and
//! the same weekday of the next three weeks. Date arithmetic stays on
//! `NaiveDate` (whole days, no time-of-day component), so daylight-saving
//! shifts can never move an instance off its weekday. All instances of one
//! expansion share a freshly drawn series color; ids and creation stamps are
//! per instance.

use chrono::{Days, Local};
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentDraft, AppointmentStatus};

/// Palette for series colors. Muted tones that keep white text readable.
pub const SERIES_COLORS: &[&str] = &[
    "#4F8A8B", "#F9A826", "#7B68EE", "#E4572E", "#3A86FF", "#2A9D8F", "#B5838D",
    "#6D9DC5", "#C08497", "#8D99AE",
];

/// Number of weekly instances a repeating booking expands to.
pub const REPEAT_WEEKS: u64 = 4;

fn pick_series_color() -> String {
    SERIES_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("#4F8A8B")
        .to_string()
}

/// Expand a draft into 1 (or, when repeating, [`REPEAT_WEEKS`]) concrete
/// appointments at 7-day steps. Instances are returned in date order and are
/// not yet persisted.
pub fn expand(draft: &AppointmentDraft, repeat: bool) -> Vec<Appointment> {
    let weeks = if repeat { REPEAT_WEEKS } else { 1 };
    let color = pick_series_color();

    (0..weeks)
        .filter_map(|week| {
            let date = draft.date.checked_add_days(Days::new(7 * week))?;
            Some(Appointment {
                id: Uuid::new_v4(),
                patient_id: draft.patient_id,
                patient_name: draft.patient_name.clone(),
                professional_name: draft.professional_name.clone(),
                unit_id: draft.unit_id,
                room: draft.room.clone(),
                date,
                time: draft.time,
                end_time: draft.end_time,
                status: AppointmentStatus::Scheduled,
                group_id: draft.group_id.clone(),
                health_plan_id: draft.health_plan_id,
                color: color.clone(),
                created_at: Local::now().naive_local(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::TimeOfDay;
    use chrono::{Datelike, NaiveDate, Weekday};
    use std::collections::HashSet;

    fn draft(date: NaiveDate) -> AppointmentDraft {
        AppointmentDraft {
            patient_id: Uuid::new_v4(),
            patient_name: "Ana".into(),
            professional_name: "Dr. Souza".into(),
            unit_id: Uuid::new_v4(),
            room: "1".into(),
            date,
            time: TimeOfDay::from_hm(9, 0).unwrap(),
            end_time: TimeOfDay::from_hm(10, 0).unwrap(),
            group_id: None,
            health_plan_id: None,
        }
    }

    #[test]
    fn no_repeat_yields_single_instance() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let instances = expand(&draft(date), false);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].date, date);
        assert_eq!(instances[0].status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn repeat_yields_four_weekly_instances() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(monday.weekday(), Weekday::Mon);

        let instances = expand(&draft(monday), true);
        assert_eq!(instances.len(), 4);

        let dates: Vec<NaiveDate> = instances.iter().map(|a| a.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 27).unwrap(),
            ]
        );
        for a in &instances {
            assert_eq!(a.date.weekday(), Weekday::Mon);
            assert_eq!(a.time, TimeOfDay::from_hm(9, 0).unwrap());
            assert_eq!(a.end_time, TimeOfDay::from_hm(10, 0).unwrap());
        }
    }

    #[test]
    fn series_shares_color_with_distinct_ids() {
        let instances = expand(&draft(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()), true);
        let colors: HashSet<&str> = instances.iter().map(|a| a.color.as_str()).collect();
        assert_eq!(colors.len(), 1);
        assert!(SERIES_COLORS.contains(&instances[0].color.as_str()));

        let ids: HashSet<Uuid> = instances.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn expansion_crosses_month_boundary() {
        let instances = expand(&draft(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()), true);
        assert_eq!(
            instances.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
        );
    }
}
