//! Scheduling core for a clinic-management dashboard.
//!
//! Owns the appointment lifecycle: weekly recurrence expansion, the status
//! state machine with its transactional side effects, group-session
//! aggregation, and the day-view calendar layout. Everything else the
//! dashboard shows (patients, chat, documents) lives outside this crate and
//! is consumed only through the [`scheduler::Scheduler`] facade.

pub mod authorization;
pub mod config;
pub mod db;
pub mod grouping;
pub mod interval;
pub mod layout;
pub mod models;
pub mod recurrence;
pub mod scheduler;
pub mod state_machine;
