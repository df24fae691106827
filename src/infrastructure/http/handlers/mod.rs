//! HTTP Handlers

mod book;
mod ping;
mod stats;

pub use book::*;
pub use ping::*;
pub use stats::*;
