//! HTTP Handlers

mod data;
mod ping;
mod records;

pub use data::*;
pub use ping::*;
pub use records::*;
