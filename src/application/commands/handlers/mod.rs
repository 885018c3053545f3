//! Command Handlers 实现

mod record_handlers;

pub use record_handlers::*;
