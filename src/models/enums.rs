use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    NoShow => "no_show",
    Cancelled => "cancelled",
});

impl AppointmentStatus {
    /// Completed, NoShow and Cancelled are terminal: no transition leaves them.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Scheduled)
    }
}

str_enum!(SlotType {
    Free => "free",
    Planning => "planning",
    Supervision => "supervision",
});

impl SlotType {
    /// Only non-free slots occupy space in the day view; free slots mark
    /// bookable time and are not layout obstacles.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::Free)
    }
}

str_enum!(Role {
    Admin => "admin",
    Coordinator => "coordinator",
    Therapist => "therapist",
    Receptionist => "receptionist",
});
