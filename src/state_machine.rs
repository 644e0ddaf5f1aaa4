//! Appointment status state machine.
//!
//! `Scheduled` is the only live state; `Completed`, `NoShow` and `Cancelled`
//! are terminal. Planning is pure: given the current status and a requested
//! transition it either rejects or returns the full side-effect set, which
//! the facade applies inside one transaction.

use serde::{Deserialize, Serialize};

use crate::models::{AppointmentStatus, Role};
use crate::scheduler::SchedulingError;

/// A requested status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Transition {
    /// Flip to Completed and stamp the patient's last visit.
    Complete,
    /// Same as [`Transition::Complete`], plus a clinical note created
    /// atomically with the other writes.
    CompleteWithNote { title: String, body: String },
    NoShow,
    Cancel,
}

/// Note payload carried by a completed-with-note plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

/// Everything a legal transition writes. The facade commits all of it or
/// none of it.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    pub new_status: AppointmentStatus,
    /// Set the patient's last-visit date to the appointment's date.
    pub set_last_visit: bool,
    pub note: Option<NoteDraft>,
}

/// Validate a transition against the current status and derive its writes.
pub fn plan(
    current: AppointmentStatus,
    transition: &Transition,
) -> Result<TransitionPlan, SchedulingError> {
    if current.is_terminal() {
        return Err(SchedulingError::InvalidTransition { from: current });
    }

    let plan = match transition {
        Transition::Complete => TransitionPlan {
            new_status: AppointmentStatus::Completed,
            set_last_visit: true,
            note: None,
        },
        Transition::CompleteWithNote { title, body } => {
            if title.trim().is_empty() || body.trim().is_empty() {
                return Err(SchedulingError::Validation(
                    "clinical note requires a title and a body".into(),
                ));
            }
            TransitionPlan {
                new_status: AppointmentStatus::Completed,
                set_last_visit: true,
                note: Some(NoteDraft {
                    title: title.clone(),
                    body: body.clone(),
                }),
            }
        }
        Transition::NoShow => TransitionPlan {
            new_status: AppointmentStatus::NoShow,
            set_last_visit: false,
            note: None,
        },
        Transition::Cancel => TransitionPlan {
            new_status: AppointmentStatus::Cancelled,
            set_last_visit: false,
            note: None,
        },
    };
    Ok(plan)
}

/// Deletion is not a transition: non-administrative roles may delete only
/// while Scheduled; administrators may delete in any state.
pub fn can_delete(status: AppointmentStatus, role: Role) -> bool {
    role == Role::Admin || status == AppointmentStatus::Scheduled
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMINAL: [AppointmentStatus; 3] = [
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
        AppointmentStatus::Cancelled,
    ];

    fn all_transitions() -> Vec<Transition> {
        vec![
            Transition::Complete,
            Transition::CompleteWithNote {
                title: "Session".into(),
                body: "notes".into(),
            },
            Transition::NoShow,
            Transition::Cancel,
        ]
    }

    #[test]
    fn terminal_states_reject_everything() {
        for status in TERMINAL {
            for transition in all_transitions() {
                let err = plan(status, &transition).unwrap_err();
                assert!(
                    matches!(err, SchedulingError::InvalidTransition { from } if from == status),
                    "expected InvalidTransition from {status}"
                );
            }
        }
    }

    #[test]
    fn complete_sets_last_visit_without_note() {
        let plan = plan(AppointmentStatus::Scheduled, &Transition::Complete).unwrap();
        assert_eq!(plan.new_status, AppointmentStatus::Completed);
        assert!(plan.set_last_visit);
        assert!(plan.note.is_none());
    }

    #[test]
    fn complete_with_note_carries_payload() {
        let plan = plan(
            AppointmentStatus::Scheduled,
            &Transition::CompleteWithNote {
                title: "Session 1".into(),
                body: "details".into(),
            },
        )
        .unwrap();
        assert_eq!(plan.new_status, AppointmentStatus::Completed);
        assert!(plan.set_last_visit);
        assert_eq!(
            plan.note,
            Some(NoteDraft {
                title: "Session 1".into(),
                body: "details".into(),
            })
        );
    }

    #[test]
    fn empty_note_fields_are_rejected() {
        for (title, body) in [("", "body"), ("title", ""), ("  ", "body"), ("", "")] {
            let err = plan(
                AppointmentStatus::Scheduled,
                &Transition::CompleteWithNote {
                    title: title.into(),
                    body: body.into(),
                },
            )
            .unwrap_err();
            assert!(matches!(err, SchedulingError::Validation(_)));
        }
    }

    #[test]
    fn no_show_and_cancel_touch_status_only() {
        for (transition, expected) in [
            (Transition::NoShow, AppointmentStatus::NoShow),
            (Transition::Cancel, AppointmentStatus::Cancelled),
        ] {
            let plan = plan(AppointmentStatus::Scheduled, &transition).unwrap();
            assert_eq!(plan.new_status, expected);
            assert!(!plan.set_last_visit);
            assert!(plan.note.is_none());
        }
    }

    #[test]
    fn delete_rules() {
        assert!(can_delete(AppointmentStatus::Scheduled, Role::Receptionist));
        assert!(!can_delete(AppointmentStatus::Completed, Role::Receptionist));
        assert!(!can_delete(AppointmentStatus::Cancelled, Role::Therapist));
        assert!(can_delete(AppointmentStatus::Completed, Role::Admin));
        assert!(can_delete(AppointmentStatus::Scheduled, Role::Admin));
    }
}
