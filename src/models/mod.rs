pub mod appointment;
pub mod availability;
pub mod enums;
pub mod patient;
pub mod time_block;

pub use appointment::*;
pub use availability::*;
pub use enums::*;
pub use patient::*;
pub use time_block::*;
