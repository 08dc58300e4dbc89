// Module exports for models

pub mod completion;
pub mod settings;
pub mod sleep;
pub mod task;
