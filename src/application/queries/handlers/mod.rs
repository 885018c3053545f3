//! Query Handlers 实现

mod node_handlers;

pub use node_handlers::*;
