pub mod appointment;
pub mod availability;
pub mod catalog;
pub mod clinical_note;
pub mod patient;
pub mod time_block;
