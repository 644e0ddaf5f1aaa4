//! Group-session aggregation.
//!
//! A group therapy session is persisted as one appointment per participant,
//! all sharing a `group_id`. The day view shows the session once, so the flat
//! list is collapsed into one renderable unit per group before layout runs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::{TimeInterval, TimeOfDay};
use crate::models::Appointment;

/// Synthetic aggregate of all appointments sharing one `group_id`.
///
/// Scheduling fields come from the first-encountered member; participant
/// names keep input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAppointment {
    pub group_id: String,
    pub unit_id: Uuid,
    pub room: String,
    pub professional_name: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub color: String,
    pub participant_names: Vec<String>,
}

/// One renderable slot in the day view: a plain appointment or a collapsed
/// group session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderableUnit {
    Single(Appointment),
    Group(GroupAppointment),
}

impl RenderableUnit {
    pub fn interval(&self) -> TimeInterval {
        match self {
            Self::Single(a) => a.interval(),
            Self::Group(g) => TimeInterval::new(g.time, g.end_time),
        }
    }
}

/// Collapse appointments sharing a `group_id` into one [`GroupAppointment`]
/// each; appointments without a group pass through unchanged. A group sits at
/// the position of its first member.
pub fn aggregate(appointments: Vec<Appointment>) -> Vec<RenderableUnit> {
    let mut out: Vec<RenderableUnit> = Vec::with_capacity(appointments.len());
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for appt in appointments {
        let Some(group_id) = appt.group_id.clone() else {
            out.push(RenderableUnit::Single(appt));
            continue;
        };

        match group_index.get(&group_id) {
            Some(&idx) => {
                if let RenderableUnit::Group(group) = &mut out[idx] {
                    group.participant_names.push(appt.patient_name);
                }
            }
            None => {
                group_index.insert(group_id.clone(), out.len());
                out.push(RenderableUnit::Group(GroupAppointment {
                    group_id,
                    unit_id: appt.unit_id,
                    room: appt.room,
                    professional_name: appt.professional_name,
                    date: appt.date,
                    time: appt.time,
                    end_time: appt.end_time,
                    color: appt.color,
                    participant_names: vec![appt.patient_name],
                }));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::Local;

    fn appt(name: &str, group_id: Option<&str>) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            patient_name: name.into(),
            professional_name: "Dr. Souza".into(),
            unit_id: Uuid::nil(),
            room: "2".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: TimeOfDay::from_hm(9, 0).unwrap(),
            end_time: TimeOfDay::from_hm(10, 0).unwrap(),
            status: AppointmentStatus::Scheduled,
            group_id: group_id.map(Into::into),
            health_plan_id: None,
            color: "#4F8A8B".into(),
            created_at: Local::now().naive_local(),
        }
    }

    #[test]
    fn group_members_collapse_into_one_unit() {
        let input = vec![
            appt("Ana", Some("G1")),
            appt("Bruno", Some("G1")),
            appt("Caio", Some("G1")),
            appt("Davi", None),
        ];
        let units = aggregate(input);
        assert_eq!(units.len(), 2);

        let RenderableUnit::Group(group) = &units[0] else {
            panic!("expected group first");
        };
        assert_eq!(group.group_id, "G1");
        assert_eq!(group.participant_names, vec!["Ana", "Bruno", "Caio"]);
        assert_eq!(group.professional_name, "Dr. Souza");
        assert_eq!(group.room, "2");

        let RenderableUnit::Single(single) = &units[1] else {
            panic!("expected passthrough second");
        };
        assert_eq!(single.patient_name, "Davi");
    }

    #[test]
    fn first_member_is_representative() {
        let mut second = appt("Bruno", Some("G1"));
        second.room = "5".into();
        second.time = TimeOfDay::from_hm(11, 0).unwrap();
        let units = aggregate(vec![appt("Ana", Some("G1")), second]);

        let RenderableUnit::Group(group) = &units[0] else {
            panic!("expected group");
        };
        assert_eq!(group.room, "2");
        assert_eq!(group.time, TimeOfDay::from_hm(9, 0).unwrap());
    }

    #[test]
    fn distinct_groups_stay_distinct() {
        let units = aggregate(vec![
            appt("Ana", Some("G1")),
            appt("Bia", Some("G2")),
            appt("Bruno", Some("G1")),
        ]);
        assert_eq!(units.len(), 2);
        let RenderableUnit::Group(g1) = &units[0] else {
            panic!()
        };
        let RenderableUnit::Group(g2) = &units[1] else {
            panic!()
        };
        assert_eq!(g1.participant_names, vec!["Ana", "Bruno"]);
        assert_eq!(g2.participant_names, vec!["Bia"]);
    }

    #[test]
    fn no_groups_passthrough_in_order() {
        let units = aggregate(vec![appt("Ana", None), appt("Bruno", None)]);
        assert_eq!(units.len(), 2);
        let names: Vec<&str> = units
            .iter()
            .map(|u| match u {
                RenderableUnit::Single(a) => a.patient_name.as_str(),
                RenderableUnit::Group(_) => panic!("unexpected group"),
            })
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[test]
    fn empty_input() {
        assert!(aggregate(vec![]).is_empty());
    }
}
