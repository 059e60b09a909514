// Module exports for models

pub mod entry;
pub mod recurrence;
pub mod settings;
