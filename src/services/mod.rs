// Service module exports

pub mod completion;
pub mod schedule;
pub mod settings;
pub mod sleep;
pub mod store;
