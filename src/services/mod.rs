// Service module exports

pub mod grid;
pub mod layout;
pub mod recurrence;
pub mod settings;
