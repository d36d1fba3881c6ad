//! Per-station min/mean/max over a `<station>;<temperature>` file.
//!
//! The input is split into record-aligned chunks ([`planner`]), each chunk is
//! streamed and aggregated on its own task ([`stream`], [`parser`]), and the
//! partial tables are folded and rendered once all tasks finish
//! ([`coordinator`], [`format`]).

pub mod aggregate;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod format;
pub mod map;
pub mod parser;
pub mod planner;
pub mod stream;
pub mod temperature;

pub use aggregate::StationAggregate;
pub use config::Config;
pub use coordinator::summarize;
pub use error::{Error, Result};
pub use format::format_summary;
pub use map::AggregateTable;
pub use planner::ChunkRange;
