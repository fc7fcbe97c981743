pub mod attendance;
pub mod holiday;
pub mod roster;
