//! Query Handlers 实现

mod book_handlers;
mod stats_handlers;

pub use book_handlers::*;
pub use stats_handlers::*;
