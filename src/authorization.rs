//! Role authorization at the facade boundary.
//!
//! Role policy itself is external configuration; this module carries the
//! default capability sets and performs the single per-operation check,
//! default-deny. Dialog-level gating in the source UI collapses to this one
//! place.

use crate::models::Role;
use crate::scheduler::SchedulingError;

/// Facade-level operations a role may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Create,
    Transition,
    Delete,
    /// Load the administrative "all units" day view.
    ViewAllUnits,
}

/// Default capability sets. Default-deny: anything not matched is refused.
pub fn allows(role: Role, capability: Capability) -> bool {
    match (role, capability) {
        (Role::Admin, _) => true,
        (Role::Coordinator, Capability::Create)
        | (Role::Coordinator, Capability::Transition)
        | (Role::Coordinator, Capability::Delete) => true,
        (Role::Therapist, Capability::Transition) => true,
        (Role::Receptionist, Capability::Create)
        | (Role::Receptionist, Capability::Transition)
        | (Role::Receptionist, Capability::Delete) => true,
        _ => false,
    }
}

/// Check a capability, surfacing denial as [`SchedulingError::Forbidden`].
pub fn require(role: Role, capability: Capability) -> Result<(), SchedulingError> {
    if allows(role, capability) {
        Ok(())
    } else {
        Err(SchedulingError::Forbidden { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_every_capability() {
        for cap in [
            Capability::Create,
            Capability::Transition,
            Capability::Delete,
            Capability::ViewAllUnits,
        ] {
            assert!(allows(Role::Admin, cap));
        }
    }

    #[test]
    fn therapist_only_transitions() {
        assert!(allows(Role::Therapist, Capability::Transition));
        assert!(!allows(Role::Therapist, Capability::Create));
        assert!(!allows(Role::Therapist, Capability::Delete));
        assert!(!allows(Role::Therapist, Capability::ViewAllUnits));
    }

    #[test]
    fn all_units_view_is_admin_only() {
        for role in [Role::Coordinator, Role::Therapist, Role::Receptionist] {
            assert!(!allows(role, Capability::ViewAllUnits));
        }
    }

    #[test]
    fn require_maps_denial_to_forbidden() {
        let err = require(Role::Therapist, Capability::Delete).unwrap_err();
        assert!(matches!(err, SchedulingError::Forbidden { role: Role::Therapist }));
        assert!(require(Role::Receptionist, Capability::Create).is_ok());
    }
}
